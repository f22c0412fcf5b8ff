use crate::{
    tools::ToolKind,
    types::{BudgetBreakdown, DailyPlanEntry, DestinationResearch, WeatherReport},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a planning request is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    #[default]
    Initialized,
    PlanningStarted,
    ToolsExecuted,
    NoToolsCalled,
    Completed,
}

/// A tool invocation that did not produce a delta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFailure {
    /// Known tool, or `None` when the oracle named one that does not exist
    pub tool: Option<ToolKind>,
    pub tool_name: String,
    pub tool_call_id: String,
    pub error_code: String,
    pub message: String,
}

/// The result of one successful tool execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum PlanDelta {
    Research(DestinationResearch),
    Weather(WeatherReport),
    Budget(BudgetBreakdown),
    Itinerary(Vec<DailyPlanEntry>),
    ItineraryMap(String),
    BudgetChart(String),
}

impl PlanDelta {
    /// Tool that produces this kind of delta
    pub fn source(&self) -> ToolKind {
        match self {
            PlanDelta::Research(_) => ToolKind::ResearchDestination,
            PlanDelta::Weather(_) => ToolKind::GetSeasonalWeather,
            PlanDelta::Budget(_) => ToolKind::CalculateBudgetBreakdown,
            PlanDelta::Itinerary(_) => ToolKind::BuildDailyItinerary,
            PlanDelta::ItineraryMap(_) => ToolKind::GenerateItineraryMap,
            PlanDelta::BudgetChart(_) => ToolKind::GenerateBudgetChart,
        }
    }

    /// Payload echoed back to the oracle as the tool observation
    pub fn to_observation(&self) -> Value {
        let payload = match self {
            PlanDelta::Research(research) => serde_json::to_value(research),
            PlanDelta::Weather(report) => serde_json::to_value(report),
            PlanDelta::Budget(breakdown) => serde_json::to_value(breakdown),
            PlanDelta::Itinerary(days) => serde_json::to_value(days),
            PlanDelta::ItineraryMap(uri) | PlanDelta::BudgetChart(uri) => {
                Ok(serde_json::json!({ "image": uri }))
            }
        };
        payload.unwrap_or_else(|err| serde_json::json!({ "error": { "message": err.to_string() } }))
    }
}

/// Immutable snapshot of everything planned so far.
///
/// Each step returns a new snapshot; earlier snapshots are never touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanState {
    pub status: PlanStatus,
    pub research: Option<DestinationResearch>,
    pub weather: Option<WeatherReport>,
    pub budget: Option<BudgetBreakdown>,
    pub itinerary: Option<Vec<DailyPlanEntry>>,
    pub itinerary_map: Option<String>,
    pub budget_chart: Option<String>,
    pub failures: Vec<ToolFailure>,
    pub report: Option<String>,
}

impl PlanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a delta into a new snapshot; a later delta of the same kind replaces the earlier one.
    pub fn apply(&self, delta: PlanDelta) -> PlanState {
        let mut next = self.clone();
        match delta {
            PlanDelta::Research(research) => next.research = Some(research),
            PlanDelta::Weather(report) => next.weather = Some(report),
            PlanDelta::Budget(breakdown) => next.budget = Some(breakdown),
            PlanDelta::Itinerary(days) => next.itinerary = Some(days),
            PlanDelta::ItineraryMap(uri) => next.itinerary_map = Some(uri),
            PlanDelta::BudgetChart(uri) => next.budget_chart = Some(uri),
        }
        next
    }

    pub fn with_failure(&self, failure: ToolFailure) -> PlanState {
        let mut next = self.clone();
        next.failures.push(failure);
        next
    }

    pub fn with_status(&self, status: PlanStatus) -> PlanState {
        PlanState {
            status,
            ..self.clone()
        }
    }

    pub fn with_report(&self, report: String) -> PlanState {
        PlanState {
            report: Some(report),
            ..self.clone()
        }
    }

    /// Researched attractions, if research has run
    pub fn attractions(&self) -> Option<&[String]> {
        self.research
            .as_ref()
            .map(|research| research.profile.attractions.as_slice())
    }

    /// Most recent failure of the given tool
    pub fn failure_for(&self, tool: ToolKind) -> Option<&ToolFailure> {
        self.failures
            .iter()
            .rev()
            .find(|failure| failure.tool == Some(tool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{destinations, weather};

    fn failure(tool: Option<ToolKind>, message: &str) -> ToolFailure {
        ToolFailure {
            tool,
            tool_name: tool.map(|kind| kind.name()).unwrap_or("mystery").to_string(),
            tool_call_id: "call_9".to_string(),
            error_code: "TOOL_EXECUTION_ERROR".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_apply_leaves_previous_snapshot_untouched() {
        let empty = PlanState::new();
        let researched = empty.apply(PlanDelta::Research(destinations::research("Paris", &[])));

        assert!(empty.research.is_none());
        assert_eq!(researched.attractions().unwrap()[0], "Eiffel Tower");

        let with_weather = researched.apply(PlanDelta::Weather(weather::lookup("Paris", Some("July"))));
        assert!(researched.weather.is_none());
        assert!(with_weather.research.is_some());
        assert!(with_weather.weather.is_some());
    }

    #[test]
    fn test_failures_accumulate_and_latest_wins() {
        let state = PlanState::new()
            .with_failure(failure(Some(ToolKind::CalculateBudgetBreakdown), "first"))
            .with_failure(failure(None, "unknown tool"))
            .with_failure(failure(Some(ToolKind::CalculateBudgetBreakdown), "second"));

        assert_eq!(state.failures.len(), 3);
        assert_eq!(
            state
                .failure_for(ToolKind::CalculateBudgetBreakdown)
                .map(|f| f.message.as_str()),
            Some("second")
        );
        assert!(state.failure_for(ToolKind::GetSeasonalWeather).is_none());
    }

    #[test]
    fn test_status_and_report_transitions() {
        let state = PlanState::new().with_status(PlanStatus::PlanningStarted);
        let done = state
            .with_report("# report".to_string())
            .with_status(PlanStatus::Completed);

        assert_eq!(state.status, PlanStatus::PlanningStarted);
        assert!(state.report.is_none());
        assert_eq!(done.status, PlanStatus::Completed);
        assert_eq!(done.report.as_deref(), Some("# report"));
    }

    #[test]
    fn test_image_observation_is_wrapped() {
        let delta = PlanDelta::BudgetChart("data:image/svg+xml;base64,AAAA".to_string());
        assert_eq!(delta.source(), ToolKind::GenerateBudgetChart);
        assert_eq!(
            delta.to_observation()["image"],
            "data:image/svg+xml;base64,AAAA"
        );
    }
}
