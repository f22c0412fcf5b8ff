use crate::core::{
    state::{PlanState, PlanStatus},
    steps::PlanStep,
    tool_call::ToolOutput,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Result of one planning request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    /// Final travel report
    pub report: String,
    /// Snapshot the report was synthesized from
    pub state: PlanState,
    /// Every step taken, in order
    pub steps: Vec<PlanStep>,
    /// One output per tool call, keyed by call id
    pub tool_outputs: Vec<ToolOutput>,
    /// Tokens used by the decision oracle, when it reports them
    pub tokens: Option<TokenUsage>,
    pub duration: Duration,
}

/// Token usage information from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Read the `usage` object of a chat completion response
    pub fn from_response(response: &Value) -> Option<Self> {
        let usage = response.get("usage")?;
        Some(TokenUsage {
            prompt_tokens: usage.get("prompt_tokens")?.as_u64()? as u32,
            completion_tokens: usage.get("completion_tokens")?.as_u64()? as u32,
            total_tokens: usage.get("total_tokens")?.as_u64()? as u32,
        })
    }
}

impl PlanResult {
    pub fn new(
        report: String,
        state: PlanState,
        steps: Vec<PlanStep>,
        tool_outputs: Vec<ToolOutput>,
        tokens: Option<TokenUsage>,
        duration: Duration,
    ) -> Self {
        Self {
            report,
            state,
            steps,
            tool_outputs,
            tokens,
            duration,
        }
    }

    pub fn status(&self) -> PlanStatus {
        self.state.status
    }

    /// Itinerary timeline image as a data-URI
    pub fn itinerary_map(&self) -> Option<&str> {
        self.state.itinerary_map.as_deref()
    }

    /// Budget chart image as a data-URI
    pub fn budget_chart(&self) -> Option<&str> {
        self.state.budget_chart.as_deref()
    }

    /// Output recorded for a given tool call id
    pub fn output_for(&self, tool_call_id: &str) -> Option<&ToolOutput> {
        self.tool_outputs
            .iter()
            .find(|output| output.tool_call_id == tool_call_id)
    }

    /// Generate a human-readable replay of the execution
    pub fn replay(&self) -> String {
        let mut lines = self.header("=== Trip Planning Trace ===");

        lines.push(String::new());
        lines.push("--- Steps ---".to_string());

        for (idx, step) in self.steps.iter().enumerate() {
            lines.push(format!("{}. {}", idx + 1, step.describe()));
        }

        lines.push(String::new());
        lines.push("--- Report ---".to_string());
        lines.push(self.report.clone());

        lines.join("\n")
    }

    /// Generate a detailed explanation with full step data
    pub fn explain(&self) -> String {
        let mut lines = self.header("=== Trip Planning Explanation ===");

        lines.push(String::new());
        lines.push("--- Detailed Steps ---".to_string());

        for (idx, step) in self.steps.iter().enumerate() {
            lines.push(format!("\n{}. {}", idx + 1, step.describe()));

            match step {
                PlanStep::Task { content } => {
                    lines.push(format!("   Content: {}", content));
                }
                PlanStep::Planning { instruction, reply } => {
                    lines.push(format!("   Instruction: {}", instruction.trim()));
                    if let Some(reply) = reply {
                        lines.push(format!("   Reply: {}", reply));
                    }
                }
                PlanStep::Action {
                    tool_name,
                    tool_call_id,
                    arguments,
                } => {
                    lines.push(format!("   Tool: {}", tool_name));
                    lines.push(format!("   Call ID: {}", tool_call_id));
                    lines.push(format!("   Arguments: {}", arguments));
                }
                PlanStep::Observation {
                    tool_call_id,
                    is_error,
                    ..
                } => {
                    lines.push(format!("   Call ID: {}", tool_call_id));
                    lines.push(format!("   Error: {}", is_error));
                    if let Some(ms) = self
                        .output_for(tool_call_id)
                        .and_then(|output| output.duration_ms)
                    {
                        lines.push(format!("   Duration: {}ms", ms));
                    }
                }
                PlanStep::Synthesis { report } => {
                    lines.push(format!("   Length: {} characters", report.chars().count()));
                }
            }
        }

        if !self.state.failures.is_empty() {
            lines.push(String::new());
            lines.push("--- Tool Failures ---".to_string());
            for failure in &self.state.failures {
                lines.push(format!(
                    "- {} [{}] {}: {}",
                    failure.tool_name, failure.tool_call_id, failure.error_code, failure.message
                ));
            }
        }

        lines.join("\n")
    }

    fn header(&self, title: &str) -> Vec<String> {
        let mut lines = vec![
            title.to_string(),
            format!("Duration: {:.2}s", self.duration.as_secs_f64()),
            format!("Status: {:?}", self.status()),
            format!("Tool calls: {}", self.action_count()),
        ];

        if let Some(tokens) = &self.tokens {
            lines.push(format!(
                "Tokens: {} prompt + {} completion = {} total",
                tokens.prompt_tokens, tokens.completion_tokens, tokens.total_tokens
            ));
        }
        lines
    }

    /// Get count of actions (tool calls) executed
    pub fn action_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, PlanStep::Action { .. }))
            .count()
    }

    pub fn observation_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, PlanStep::Observation { .. }))
            .count()
    }

    /// The planning run reached its terminal state
    pub fn is_success(&self) -> bool {
        self.status() == PlanStatus::Completed
    }

    /// Messages of every tool call that failed
    pub fn errors(&self) -> Vec<&str> {
        self.state
            .failures
            .iter()
            .map(|failure| failure.message.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ToolFailure;
    use crate::tools::ToolKind;
    use serde_json::json;

    fn sample() -> PlanResult {
        let state = PlanState::new()
            .with_failure(ToolFailure {
                tool: Some(ToolKind::CalculateBudgetBreakdown),
                tool_name: "calculate_budget_breakdown".to_string(),
                tool_call_id: "call_2".to_string(),
                error_code: "INVALID_ARGUMENT".to_string(),
                message: "Invalid argument: trip duration must be at least 1 day".to_string(),
            })
            .with_report("# 🌍 PARIS TRAVEL PLAN".to_string())
            .with_status(PlanStatus::Completed);

        let steps = vec![
            PlanStep::Task {
                content: "Paris".to_string(),
            },
            PlanStep::Action {
                tool_name: "calculate_budget_breakdown".to_string(),
                tool_call_id: "call_2".to_string(),
                arguments: json!({ "duration": 0 }),
            },
            PlanStep::Observation {
                tool_call_id: "call_2".to_string(),
                result: "{\"error\":{}}".to_string(),
                is_error: true,
            },
            PlanStep::Synthesis {
                report: "# 🌍 PARIS TRAVEL PLAN".to_string(),
            },
        ];

        PlanResult::new(
            "# 🌍 PARIS TRAVEL PLAN".to_string(),
            state,
            steps,
            Vec::new(),
            Some(TokenUsage {
                prompt_tokens: 100,
                completion_tokens: 50,
                total_tokens: 150,
            }),
            Duration::from_millis(1500),
        )
    }

    #[test]
    fn test_counts_and_success() {
        let result = sample();
        assert!(result.is_success());
        assert_eq!(result.action_count(), 1);
        assert_eq!(result.observation_count(), 1);
        assert_eq!(result.errors().len(), 1);
        assert!(result.itinerary_map().is_none());
    }

    #[test]
    fn test_replay_format() {
        let replay = sample().replay();
        assert!(replay.contains("Trip Planning Trace"));
        assert!(replay.contains("Duration: 1.50s"));
        assert!(replay.contains("Tokens: 100 prompt + 50 completion = 150 total"));
        assert!(replay.contains("🔧 Action: calculate_budget_breakdown"));
        assert!(replay.contains("--- Report ---"));
    }

    #[test]
    fn test_explain_lists_failures() {
        let explain = sample().explain();
        assert!(explain.contains("Detailed Steps"));
        assert!(explain.contains("Call ID: call_2"));
        assert!(explain.contains("--- Tool Failures ---"));
        assert!(explain.contains("INVALID_ARGUMENT"));
    }

    #[test]
    fn test_token_usage_from_response() {
        let response = json!({
            "usage": { "prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20 }
        });
        assert_eq!(
            TokenUsage::from_response(&response),
            Some(TokenUsage {
                prompt_tokens: 12,
                completion_tokens: 8,
                total_tokens: 20
            })
        );
        assert_eq!(TokenUsage::from_response(&json!({})), None);
    }
}
