use serde::{Deserialize, Serialize};
use serde_json::Value;

const PREVIEW_CHARS: usize = 160;

/// One recorded step of a planning run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanStep {
    /// Trip request as given by the user
    Task { content: String },
    /// Instruction sent to the decision oracle, plus any text it replied with
    Planning {
        instruction: String,
        #[serde(default)]
        #[serde(skip_serializing_if = "Option::is_none")]
        reply: Option<String>,
    },
    /// A tool call chosen by the oracle
    Action {
        tool_name: String,
        tool_call_id: String,
        arguments: Value,
    },
    /// Result of a tool execution
    Observation {
        tool_call_id: String,
        result: String,
        is_error: bool,
    },
    /// Final report assembled from the plan state
    Synthesis { report: String },
}

impl PlanStep {
    /// Get a human-readable description of the step
    pub fn describe(&self) -> String {
        match self {
            PlanStep::Task { content } => format!("🧭 Task: {}", content),
            PlanStep::Planning { reply, .. } => match reply {
                Some(reply) if !reply.trim().is_empty() => {
                    format!("🧩 Plan: {}", preview(reply))
                }
                _ => "🧩 Plan: asked the decision oracle which tools to call".to_string(),
            },
            PlanStep::Action {
                tool_name,
                arguments,
                ..
            } => format!("🔧 Action: {}({})", tool_name, preview(&arguments.to_string())),
            PlanStep::Observation {
                result, is_error, ..
            } => {
                if *is_error {
                    format!("❌ Error: {}", preview(result))
                } else {
                    format!("👁 Observation: {}", preview(result))
                }
            }
            PlanStep::Synthesis { report } => {
                let title = report.lines().next().unwrap_or_default();
                format!("📝 Report: {} ({} lines)", title, report.lines().count())
            }
        }
    }
}

/// Long observations (chart data-URIs especially) are cut for display.
fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{}…", head)
}
