pub mod agent;
pub mod memory;
pub mod oracle;
pub mod state;
pub mod steps;
pub mod synthesis;
pub mod tool_call;

pub use crate::types::result::{PlanResult, TokenUsage};
pub use agent::TravelPlannerAgent;
pub use memory::PlanMemory;
pub use oracle::{DecisionOracle, OpenAIOracle, OracleDecision, ScriptedOracle};
pub use state::{PlanDelta, PlanState, PlanStatus, ToolFailure};
pub use steps::PlanStep;
pub use synthesis::synthesize;
pub use tool_call::{ToolCall, ToolExecution, ToolOutput};
