use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Relative cost of a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for CostLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CostLevel::Low => "Low",
            CostLevel::Medium => "Medium",
            CostLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// Static facts about a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationProfile {
    /// Destination name as requested
    pub name: String,
    /// Key attractions, never empty
    pub attractions: Vec<String>,
    /// Typical activities in catalog order
    pub activities: Vec<String>,
    /// Recommended season to visit
    pub best_season: String,
    pub cost_level: CostLevel,
    pub description: String,
}

/// Destination profile plus the activities that matched the traveler's interests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationResearch {
    #[serde(flatten)]
    pub profile: DestinationProfile,
    pub interests: Vec<String>,
    pub recommended_activities: Vec<String>,
}

/// Season bucket a travel month falls into for a given climate family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    Dry,
    Wet,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
            Season::Dry => "dry",
            Season::Wet => "wet",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seasonal weather and packing advice for a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub destination: String,
    pub travel_month: Option<String>,
    /// Season bucket computed from the month, even when the fallback profile was used
    pub season: Season,
    pub temperature: String,
    pub conditions: String,
    pub packing_recommendations: Vec<String>,
    pub average_rainfall: String,
    pub daily_sunlight: String,
    pub special_notes: Option<String>,
    /// True when the destination/season pair was not in the catalog
    pub is_fallback: bool,
}

/// Fixed spending categories of a budget breakdown, in display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    Accommodation,
    FoodDining,
    ActivitiesEntertainment,
    Transportation,
    ShoppingSouvenirs,
    EmergencyMisc,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 6] = [
        BudgetCategory::Accommodation,
        BudgetCategory::FoodDining,
        BudgetCategory::ActivitiesEntertainment,
        BudgetCategory::Transportation,
        BudgetCategory::ShoppingSouvenirs,
        BudgetCategory::EmergencyMisc,
    ];

    /// Fraction of the total budget; the six shares sum to 1.0.
    pub fn share(&self) -> f64 {
        match self {
            BudgetCategory::Accommodation => 0.35,
            BudgetCategory::FoodDining => 0.25,
            BudgetCategory::ActivitiesEntertainment => 0.20,
            BudgetCategory::Transportation => 0.12,
            BudgetCategory::ShoppingSouvenirs => 0.05,
            BudgetCategory::EmergencyMisc => 0.03,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetCategory::Accommodation => "Accommodation",
            BudgetCategory::FoodDining => "Food Dining",
            BudgetCategory::ActivitiesEntertainment => "Activities Entertainment",
            BudgetCategory::Transportation => "Transportation",
            BudgetCategory::ShoppingSouvenirs => "Shopping Souvenirs",
            BudgetCategory::EmergencyMisc => "Emergency Misc",
        }
    }
}

/// Coarse budget tier derived from the reference daily cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetLevel {
    Luxury,
    Comfort,
    Budget,
}

impl fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetLevel::Luxury => "Luxury",
            BudgetLevel::Comfort => "Comfort",
            BudgetLevel::Budget => "Budget",
        };
        f.write_str(label)
    }
}

/// One labelled amount of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSlice {
    pub label: String,
    pub amount: f64,
}

/// Fixed-percentage split of a trip budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub destination: String,
    pub total_budget: f64,
    pub trip_duration: u32,
    pub traveler_count: u32,
    /// Whole-trip amount per category
    pub categories: BTreeMap<BudgetCategory, f64>,
    /// Per-day amount per category
    pub daily_breakdown: BTreeMap<BudgetCategory, f64>,
    pub budget_per_day: f64,
    pub budget_per_person: f64,
    /// Expected daily spend used only to classify `budget_level`
    pub reference_daily_cost: f64,
    pub budget_level: BudgetLevel,
}

impl BudgetBreakdown {
    pub fn amount(&self, category: BudgetCategory) -> f64 {
        self.categories.get(&category).copied().unwrap_or_default()
    }

    pub fn daily_amount(&self, category: BudgetCategory) -> f64 {
        self.daily_breakdown
            .get(&category)
            .copied()
            .unwrap_or_default()
    }

    /// Sum of the rounded category amounts; may drift from the total by a few cents.
    pub fn allocated_total(&self) -> f64 {
        self.categories.values().sum()
    }

    pub fn slices(&self) -> Vec<BudgetSlice> {
        to_slices(&self.categories)
    }

    pub fn daily_slices(&self) -> Vec<BudgetSlice> {
        to_slices(&self.daily_breakdown)
    }
}

fn to_slices(amounts: &BTreeMap<BudgetCategory, f64>) -> Vec<BudgetSlice> {
    amounts
        .iter()
        .map(|(category, amount)| BudgetSlice {
            label: category.label().to_string(),
            amount: *amount,
        })
        .collect()
}

/// Per-day itinerary slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DailyPlanEntry {
    /// 1-based day counter within the itinerary
    pub day: u32,
    /// Attraction the day is built around
    #[serde(default)]
    pub attraction: String,
    /// Morning plan
    pub morning: String,
    /// Afternoon plan
    pub afternoon: String,
    /// Evening plan
    pub evening: String,
    /// Meal arrangements
    #[serde(default)]
    pub meals: String,
    /// Kind of lodging for the night
    #[serde(default)]
    pub accommodation_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_shares_sum_to_one() {
        let total: f64 = BudgetCategory::ALL.iter().map(|c| c.share()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_keys_serialize_as_snake_case() {
        let mut categories = BTreeMap::new();
        categories.insert(BudgetCategory::FoodDining, 10.0);
        let json = serde_json::to_value(&categories).unwrap();
        assert_eq!(json["food_dining"], 10.0);
    }
}
