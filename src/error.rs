use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Decision oracle error: {0}")]
    Oracle(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Whether the error aborts a whole planning request when raised at request level.
    ///
    /// Tool calls never abort a request: whatever a tool returns, including
    /// `InvalidArgument`, is recorded as a failure of that call only.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PlannerError::Config(_)
                | PlannerError::InvalidArgument(_)
                | PlannerError::Oracle(_)
                | PlannerError::Timeout(_)
                | PlannerError::RateLimit { .. }
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::InvalidArgument(_) => "INVALID_ARGUMENT",
            PlannerError::Oracle(_) => "ORACLE_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
            PlannerError::ToolExecution(_) => "TOOL_EXECUTION_ERROR",
            PlannerError::ToolNotFound(_) => "TOOL_NOT_FOUND",
            PlannerError::Render(_) => "RENDER_ERROR",
            PlannerError::Timeout(_) => "TIMEOUT_ERROR",
            PlannerError::RateLimit { .. } => "RATE_LIMIT_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_carries_code_and_message() {
        let error = PlannerError::InvalidArgument("duration must be at least 1 day".to_string());
        let payload = error.to_error_payload();

        assert_eq!(payload["error"]["code"], "INVALID_ARGUMENT");
        assert!(payload["error"]["message"]
            .as_str()
            .unwrap()
            .contains("duration must be at least 1 day"));
    }

    #[test]
    fn test_fatality_split() {
        assert!(PlannerError::Oracle("down".to_string()).is_fatal());
        assert!(PlannerError::Timeout("slow".to_string()).is_fatal());
        assert!(PlannerError::InvalidArgument("zero days".to_string()).is_fatal());
        assert!(!PlannerError::ToolExecution("boom".to_string()).is_fatal());
        assert!(!PlannerError::ToolNotFound("teleport".to_string()).is_fatal());
    }
}
