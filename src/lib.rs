//! trip-planner-rs: a type-safe travel itinerary planner driven by LLM tool calling
//!
//! A decision oracle (an OpenAI-compatible model, or the built-in scripted
//! oracle) picks which planning tools to run. The tools are pure lookups over
//! static destination, weather and budget tables; their results are folded into
//! an immutable plan snapshot and rendered as a Markdown report plus two chart
//! images.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_planner_rs::{TravelPlannerAgent, TravelStyle, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = TripRequest::new("Paris", 3, 1500.0)
//!         .with_travel_style(TravelStyle::Cultural)
//!         .with_traveler_count(2);
//!
//!     let agent = TravelPlannerAgent::from_env()?;
//!     let plan = agent.plan_trip(&request).await?;
//!     println!("{}", plan.report);
//!     Ok(())
//! }
//! ```

pub mod budget;
pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod itinerary;
pub mod render;
pub(crate) mod services;
pub mod tools;
pub mod types;

pub use config::PlannerConfig;
pub use crate::core::{
    DecisionOracle, OpenAIOracle, OracleDecision, PlanDelta, PlanMemory, PlanResult, PlanState,
    PlanStatus, PlanStep, ScriptedOracle, TokenUsage, ToolCall, ToolExecution, ToolFailure,
    ToolOutput, TravelPlannerAgent,
};
pub use error::{PlannerError, Result};
pub use render::{ChartRenderer, SvgChartRenderer};
pub use tools::{tool_definitions, ToolCommand, ToolKind};
pub use types::{
    BudgetBreakdown, BudgetCategory, BudgetLevel, BudgetSlice, CostLevel, DailyPlanEntry,
    DestinationProfile, DestinationResearch, Month, Season, TravelStyle, TripRequest,
    WeatherReport, MAX_TRIP_DAYS,
};

#[cfg(feature = "cli")]
pub mod cli;
