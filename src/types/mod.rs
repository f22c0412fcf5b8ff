pub mod request;
pub mod result;
pub mod trip_types;

pub use request::{Month, TravelStyle, TripRequest, MAX_TRIP_DAYS};
pub use result::{PlanResult, TokenUsage};
pub use trip_types::{
    BudgetBreakdown, BudgetCategory, BudgetLevel, BudgetSlice, CostLevel, DailyPlanEntry,
    DestinationProfile, DestinationResearch, Season, WeatherReport,
};
