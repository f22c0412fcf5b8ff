use crate::error::{PlannerError, Result};
use schemars::{
    gen::SchemaGenerator,
    schema::{InstanceType, Metadata, Schema, SchemaObject},
    JsonSchema,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// Travel style chosen by the user; drives cost multipliers and itinerary templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Luxury,
    Comfort,
    Cultural,
    Adventure,
    Relaxation,
    Budget,
    #[default]
    Mixed,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 7] = [
        TravelStyle::Luxury,
        TravelStyle::Comfort,
        TravelStyle::Cultural,
        TravelStyle::Adventure,
        TravelStyle::Relaxation,
        TravelStyle::Budget,
        TravelStyle::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelStyle::Luxury => "luxury",
            TravelStyle::Comfort => "comfort",
            TravelStyle::Cultural => "cultural",
            TravelStyle::Adventure => "adventure",
            TravelStyle::Relaxation => "relaxation",
            TravelStyle::Budget => "budget",
            TravelStyle::Mixed => "mixed",
        }
    }

    /// Lenient parse used for oracle-supplied arguments: anything unrecognised is `Mixed`.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelStyle {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        TravelStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                PlannerError::InvalidArgument(format!(
                    "unknown travel style '{}' (expected one of: {})",
                    s,
                    TravelStyle::ALL.map(|style| style.as_str()).join(", ")
                ))
            })
    }
}

impl<'de> Deserialize<'de> for TravelStyle {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(TravelStyle::from_label(&label))
    }
}

impl JsonSchema for TravelStyle {
    fn schema_name() -> String {
        "TravelStyle".to_string()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            metadata: Some(Box::new(Metadata {
                description: Some(format!(
                    "Travel style, one of: {}. Unrecognised styles are treated as mixed.",
                    TravelStyle::ALL.map(|style| style.as_str()).join(", ")
                )),
                ..Default::default()
            })),
            ..Default::default()
        }
        .into()
    }
}

/// Calendar month used for season bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Case-insensitive parse of a full English month name or its three-letter abbreviation.
    pub fn parse(label: &str) -> Option<Month> {
        let wanted = label.trim();
        if wanted.len() < 3 {
            return None;
        }
        Month::ALL.into_iter().find(|month| {
            month.name().eq_ignore_ascii_case(wanted)
                || (wanted.len() == 3 && month.name()[..3].eq_ignore_ascii_case(wanted))
        })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Longest trip, in days, that can be planned
pub const MAX_TRIP_DAYS: u32 = 365;

/// Reject durations outside `1..=MAX_TRIP_DAYS`.
pub(crate) fn check_duration(duration: u32) -> Result<()> {
    if duration == 0 {
        return Err(PlannerError::InvalidArgument(
            "duration must be at least 1 day".to_string(),
        ));
    }
    if duration > MAX_TRIP_DAYS {
        return Err(PlannerError::InvalidArgument(format!(
            "duration must be at most {} days, got {}",
            MAX_TRIP_DAYS, duration
        )));
    }
    Ok(())
}

fn default_traveler_count() -> u32 {
    1
}

fn default_interests() -> Vec<String> {
    vec!["sightseeing".to_string()]
}

fn default_travel_month() -> String {
    "May".to_string()
}

/// Trip parameters submitted by the user. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Destination name (e.g., "Paris")
    pub destination: String,
    /// Trip length in days
    pub duration: u32,
    /// Total budget for the whole trip
    pub budget: f64,
    #[serde(default)]
    pub travel_style: TravelStyle,
    #[serde(default = "default_traveler_count")]
    pub traveler_count: u32,
    #[serde(default = "default_interests")]
    pub interests: Vec<String>,
    #[serde(default = "default_travel_month")]
    pub travel_month: String,
}

impl TripRequest {
    pub fn new(destination: impl Into<String>, duration: u32, budget: f64) -> Self {
        Self {
            destination: destination.into(),
            duration,
            budget,
            travel_style: TravelStyle::default(),
            traveler_count: default_traveler_count(),
            interests: default_interests(),
            travel_month: default_travel_month(),
        }
    }

    pub fn with_travel_style(mut self, travel_style: TravelStyle) -> Self {
        self.travel_style = travel_style;
        self
    }

    pub fn with_traveler_count(mut self, traveler_count: u32) -> Self {
        self.traveler_count = traveler_count;
        self
    }

    /// Replace the interest tags; an empty list keeps the `sightseeing` default.
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let interests: Vec<String> = interests
            .into_iter()
            .map(Into::into)
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        self.interests = if interests.is_empty() {
            default_interests()
        } else {
            interests
        };
        self
    }

    pub fn with_travel_month(mut self, travel_month: impl Into<String>) -> Self {
        self.travel_month = travel_month.into();
        self
    }

    /// Reject requests that cannot be planned before any work is done.
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().is_empty() {
            return Err(PlannerError::InvalidArgument(
                "destination must not be empty".to_string(),
            ));
        }
        check_duration(self.duration)?;
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(PlannerError::InvalidArgument(format!(
                "budget must be a positive amount, got {}",
                self.budget
            )));
        }
        if self.traveler_count == 0 {
            return Err(PlannerError::InvalidArgument(
                "traveler count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = TripRequest::new("Paris", 3, 1500.0);

        assert_eq!(request.travel_style, TravelStyle::Mixed);
        assert_eq!(request.traveler_count, 1);
        assert_eq!(request.interests, vec!["sightseeing".to_string()]);
        assert_eq!(request.travel_month, "May");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_validation_failures() {
        let zero_days = TripRequest::new("Paris", 0, 1500.0);
        assert!(matches!(
            zero_days.validate(),
            Err(PlannerError::InvalidArgument(_))
        ));

        let negative_budget = TripRequest::new("Paris", 3, -10.0);
        assert!(matches!(
            negative_budget.validate(),
            Err(PlannerError::InvalidArgument(_))
        ));

        let nobody = TripRequest::new("Paris", 3, 1500.0).with_traveler_count(0);
        assert!(matches!(
            nobody.validate(),
            Err(PlannerError::InvalidArgument(_))
        ));

        let nowhere = TripRequest::new("  ", 3, 1500.0);
        assert!(nowhere.validate().is_err());

        let endless = TripRequest::new("Paris", MAX_TRIP_DAYS + 1, 1500.0);
        assert!(matches!(
            endless.validate(),
            Err(PlannerError::InvalidArgument(message)) if message.contains("at most 365")
        ));
        assert!(TripRequest::new("Paris", MAX_TRIP_DAYS, 1500.0).validate().is_ok());
    }

    #[test]
    fn test_empty_interests_keep_default() {
        let request = TripRequest::new("Tokyo", 2, 900.0).with_interests(Vec::<String>::new());
        assert_eq!(request.interests, vec!["sightseeing".to_string()]);

        let request = TripRequest::new("Tokyo", 2, 900.0).with_interests([" temple ", ""]);
        assert_eq!(request.interests, vec!["temple".to_string()]);
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("Luxury".parse::<TravelStyle>().unwrap(), TravelStyle::Luxury);
        assert!("backpacking".parse::<TravelStyle>().is_err());
        assert_eq!(TravelStyle::from_label("backpacking"), TravelStyle::Mixed);

        let style: TravelStyle = serde_json::from_str("\"CULTURAL\"").unwrap();
        assert_eq!(style, TravelStyle::Cultural);
    }

    #[test]
    fn test_month_parsing() {
        assert_eq!(Month::parse("july"), Some(Month::July));
        assert_eq!(Month::parse(" DECEMBER "), Some(Month::December));
        assert_eq!(Month::parse("Sep"), Some(Month::September));
        assert_eq!(Month::parse("Smarch"), None);
        assert_eq!(Month::parse("Ma"), None);
    }
}
