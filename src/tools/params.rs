//! Typed arguments for each tool, with schemas generated for the oracle.

use crate::types::{DailyPlanEntry, TravelStyle};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameters for destination research
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResearchParams {
    /// Destination city or region
    pub destination: String,
    /// Interest tags used to pick recommended activities
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Parameters for seasonal weather lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherParams {
    /// Destination city or region
    pub destination: String,
    /// Month of travel, full name or three-letter abbreviation
    #[serde(default)]
    pub travel_month: Option<String>,
}

/// Parameters for budget allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BudgetParams {
    /// Destination city or region
    pub destination: String,
    /// Trip length in days
    #[schemars(range(min = 1, max = 365))]
    pub duration: u32,
    /// Total budget for the whole trip
    pub total_budget: f64,
    #[serde(default)]
    pub travel_style: Option<TravelStyle>,
    /// Number of travelers sharing the budget
    #[serde(default)]
    pub traveler_count: Option<u32>,
}

/// Parameters for itinerary building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItineraryParams {
    /// Destination city or region
    pub destination: String,
    /// Trip length in days
    #[schemars(range(min = 1, max = 365))]
    pub duration: u32,
    #[serde(default)]
    pub travel_style: Option<TravelStyle>,
    /// Attractions to cycle through; defaults to the researched attractions
    #[serde(default)]
    pub attractions: Option<Vec<String>>,
}

/// Parameters for the itinerary map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItineraryMapParams {
    /// Destination city or region
    pub destination: String,
    /// Daily plan to draw; defaults to the itinerary already built
    #[serde(default)]
    pub itinerary: Option<Vec<DailyPlanEntry>>,
    /// Attractions to highlight; defaults to the researched attractions
    #[serde(default)]
    pub attractions: Option<Vec<String>>,
}

/// Parameters for the budget chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BudgetChartParams {
    /// Category name to amount; defaults to the budget breakdown already calculated
    #[serde(default)]
    pub budget_breakdown: Option<BTreeMap<String, f64>>,
}
