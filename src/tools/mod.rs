//! Tools module: the closed set of planning operations the oracle can call

pub mod command;
pub mod params;
pub mod tool;
pub(crate) mod validation;

pub use command::ToolCommand;
pub use params::{
    BudgetChartParams, BudgetParams, ItineraryMapParams, ItineraryParams, ResearchParams,
    WeatherParams,
};
pub use tool::{tool_definitions, ToolKind};
