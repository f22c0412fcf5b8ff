use super::ToolKind;
use crate::error::{PlannerError, Result};
use jsonschema::{Draft, JSONSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Check call arguments against the tool's parameter schema.
pub(crate) fn validate_arguments(kind: ToolKind, arguments: &Value) -> Result<()> {
    let schema = kind.parameters_schema();
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .map_err(|err| {
            PlannerError::Validation(format!(
                "Failed to prepare `{}` schema for validation: {}",
                kind, err
            ))
        })?;

    if let Err(errors) = validator.validate(arguments) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "arguments failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(PlannerError::Validation(format!(
            "Arguments do not match `{}` parameters: {}",
            kind, detail_str
        )));
    }

    Ok(())
}

/// Deserialize validated arguments, reporting the failing field path.
pub(crate) fn deserialize_arguments<T: DeserializeOwned>(
    kind: ToolKind,
    arguments: Value,
) -> Result<T> {
    serde_path_to_error::deserialize(arguments).map_err(|err| {
        PlannerError::Validation(format!(
            "Invalid `{}` arguments at {}: {}",
            kind,
            err.path(),
            err.inner()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::params::BudgetParams;
    use serde_json::json;

    #[test]
    fn test_valid_arguments_pass() {
        let arguments = json!({
            "destination": "Paris",
            "duration": 3,
            "total_budget": 1500.0,
            "travel_style": "cultural"
        });
        assert!(validate_arguments(ToolKind::CalculateBudgetBreakdown, &arguments).is_ok());

        let params: BudgetParams =
            deserialize_arguments(ToolKind::CalculateBudgetBreakdown, arguments).unwrap();
        assert_eq!(params.duration, 3);
        assert_eq!(params.traveler_count, None);
    }

    #[test]
    fn test_missing_and_mistyped_fields_are_reported() {
        let arguments = json!({ "duration": "three", "total_budget": "lots" });
        let err = validate_arguments(ToolKind::CalculateBudgetBreakdown, &arguments).unwrap_err();

        match err {
            PlannerError::Validation(message) => {
                assert!(message.contains("calculate_budget_breakdown"));
                assert!(message.contains("/duration") || message.contains("destination"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_arguments_are_rejected() {
        let raw = Value::String("{not json".to_string());
        assert!(matches!(
            validate_arguments(ToolKind::GetSeasonalWeather, &raw),
            Err(PlannerError::Validation(_))
        ));
    }

    #[test]
    fn test_deserialize_reports_path() {
        let err = deserialize_arguments::<BudgetParams>(
            ToolKind::CalculateBudgetBreakdown,
            json!({ "destination": "Paris", "duration": -1, "total_budget": 10.0 }),
        )
        .unwrap_err();
        assert!(err.to_string().contains("duration"));
    }
}
