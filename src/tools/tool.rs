use super::params::{
    BudgetChartParams, BudgetParams, ItineraryMapParams, ItineraryParams, ResearchParams,
    WeatherParams,
};
use schemars::{gen::SchemaSettings, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The closed set of operations the decision oracle may invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    ResearchDestination,
    BuildDailyItinerary,
    CalculateBudgetBreakdown,
    GetSeasonalWeather,
    GenerateItineraryMap,
    GenerateBudgetChart,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::ResearchDestination,
        ToolKind::BuildDailyItinerary,
        ToolKind::CalculateBudgetBreakdown,
        ToolKind::GetSeasonalWeather,
        ToolKind::GenerateItineraryMap,
        ToolKind::GenerateBudgetChart,
    ];

    /// The name of the tool (used in function calls)
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::ResearchDestination => "research_destination",
            ToolKind::BuildDailyItinerary => "build_daily_itinerary",
            ToolKind::CalculateBudgetBreakdown => "calculate_budget_breakdown",
            ToolKind::GetSeasonalWeather => "get_seasonal_weather",
            ToolKind::GenerateItineraryMap => "generate_itinerary_map",
            ToolKind::GenerateBudgetChart => "generate_budget_chart",
        }
    }

    pub fn from_name(name: &str) -> Option<ToolKind> {
        ToolKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// A description of what the tool does
    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::ResearchDestination => {
                "Research a travel destination: key attractions, typical activities, best season, cost level, and activities matching the traveler's interests."
            }
            ToolKind::BuildDailyItinerary => {
                "Build a day-by-day itinerary with morning, afternoon and evening plans. Attractions default to the ones found by research_destination."
            }
            ToolKind::CalculateBudgetBreakdown => {
                "Split a total trip budget into accommodation, food, activities, transportation, shopping and emergency categories, with per-day and per-person amounts."
            }
            ToolKind::GetSeasonalWeather => {
                "Get typical weather conditions and packing recommendations for a destination in a given travel month."
            }
            ToolKind::GenerateItineraryMap => {
                "Render the daily itinerary as a visual timeline image. Defaults to the itinerary and attractions already planned."
            }
            ToolKind::GenerateBudgetChart => {
                "Render the budget breakdown as a chart image. Defaults to the budget breakdown already calculated."
            }
        }
    }

    /// JSON Schema for the tool's parameters
    pub fn parameters_schema(&self) -> Value {
        match self {
            ToolKind::ResearchDestination => schema_value::<ResearchParams>(),
            ToolKind::BuildDailyItinerary => schema_value::<ItineraryParams>(),
            ToolKind::CalculateBudgetBreakdown => schema_value::<BudgetParams>(),
            ToolKind::GetSeasonalWeather => schema_value::<WeatherParams>(),
            ToolKind::GenerateItineraryMap => schema_value::<ItineraryMapParams>(),
            ToolKind::GenerateBudgetChart => schema_value::<BudgetChartParams>(),
        }
    }

    /// Function-calling definition in OpenAI format
    pub fn to_openai_tool(&self) -> Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description(),
                "parameters": self.parameters_schema()
            }
        })
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generate tool schemas for OpenAI function calling
pub fn tool_definitions() -> Vec<Value> {
    ToolKind::ALL
        .iter()
        .map(|kind| kind.to_openai_tool())
        .collect()
}

fn schema_value<T: JsonSchema>() -> Value {
    let root = SchemaSettings::draft07()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator()
        .into_root_schema_for::<T>();

    let mut schema = serde_json::to_value(root).unwrap_or_else(|err| {
        panic!(
            "failed to serialize schema for {}: {}",
            std::any::type_name::<T>(),
            err
        )
    });
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
    }
    schema
}
