//! Seasonal weather catalog and climate-family season bucketing.

use crate::types::{Month, Season, WeatherReport};
use tracing::debug;

/// Destinations with a tropical dry/wet year.
const TROPICAL_DESTINATIONS: &[&str] = &["bali"];

/// Destinations whose year is split into a winter and a summer only.
const TWO_SEASON_DESTINATIONS: &[&str] = &["karachi", "lahore", "hunza", "swat"];

struct SeasonEntry {
    destination: &'static str,
    season: Season,
    temperature: &'static str,
    conditions: &'static str,
    packing: &'static [&'static str],
    rainfall: &'static str,
    sunlight: &'static str,
    note: Option<&'static str>,
}

static SEASONS: &[SeasonEntry] = &[
    SeasonEntry {
        destination: "paris",
        season: Season::Spring,
        temperature: "10-18°C",
        conditions: "Mild with occasional rain",
        packing: &["Light jacket", "Umbrella", "Layered clothing"],
        rainfall: "Moderate",
        sunlight: "12-14 hours",
        note: None,
    },
    SeasonEntry {
        destination: "paris",
        season: Season::Summer,
        temperature: "18-25°C",
        conditions: "Warm and pleasant",
        packing: &["Light clothing", "Sunglasses", "Sun protection"],
        rainfall: "Low",
        sunlight: "14-16 hours",
        note: None,
    },
    SeasonEntry {
        destination: "paris",
        season: Season::Autumn,
        temperature: "8-15°C",
        conditions: "Cool and crisp",
        packing: &["Sweaters", "Waterproof jacket", "Comfortable shoes"],
        rainfall: "Moderate",
        sunlight: "10-12 hours",
        note: None,
    },
    SeasonEntry {
        destination: "paris",
        season: Season::Winter,
        temperature: "2-8°C",
        conditions: "Cold with possible snow",
        packing: &["Warm coat", "Scarf", "Gloves", "Boots"],
        rainfall: "Low to Moderate",
        sunlight: "8-9 hours",
        note: None,
    },
    SeasonEntry {
        destination: "tokyo",
        season: Season::Spring,
        temperature: "12-20°C",
        conditions: "Mild with cherry blossoms",
        packing: &["Light layers", "Comfortable walking shoes", "Camera"],
        rainfall: "Moderate",
        sunlight: "12-14 hours",
        note: None,
    },
    SeasonEntry {
        destination: "tokyo",
        season: Season::Summer,
        temperature: "22-30°C",
        conditions: "Hot and humid",
        packing: &[
            "Light breathable clothing",
            "Hat",
            "Water bottle",
            "Sunscreen",
        ],
        rainfall: "High",
        sunlight: "13-15 hours",
        note: None,
    },
    SeasonEntry {
        destination: "tokyo",
        season: Season::Autumn,
        temperature: "15-22°C",
        conditions: "Cool and comfortable",
        packing: &["Light jacket", "Layered clothing", "Walking shoes"],
        rainfall: "Moderate",
        sunlight: "11-13 hours",
        note: None,
    },
    SeasonEntry {
        destination: "tokyo",
        season: Season::Winter,
        temperature: "2-10°C",
        conditions: "Cold and dry",
        packing: &["Warm coat", "Thermal layers", "Scarf", "Gloves"],
        rainfall: "Low",
        sunlight: "9-10 hours",
        note: None,
    },
    SeasonEntry {
        destination: "bali",
        season: Season::Dry,
        temperature: "26-32°C",
        conditions: "Warm and sunny",
        packing: &["Light clothing", "Swimwear", "Sunscreen", "Hat"],
        rainfall: "Low",
        sunlight: "12 hours",
        note: Some("Dry Season (April-September)"),
    },
    SeasonEntry {
        destination: "bali",
        season: Season::Wet,
        temperature: "24-30°C",
        conditions: "Warm with heavy rainfall",
        packing: &["Light rain jacket", "Quick-dry clothing", "Waterproof bag"],
        rainfall: "High",
        sunlight: "10-11 hours",
        note: Some("Wet Season (October-March)"),
    },
    SeasonEntry {
        destination: "islamabad",
        season: Season::Spring,
        temperature: "15-28°C",
        conditions: "Pleasant with blooming hills",
        packing: &["Light layers", "Walking shoes", "Sunglasses"],
        rainfall: "Moderate",
        sunlight: "11-12 hours",
        note: None,
    },
    SeasonEntry {
        destination: "islamabad",
        season: Season::Summer,
        temperature: "25-38°C",
        conditions: "Hot with monsoon showers",
        packing: &[
            "Breathable cotton clothing",
            "Umbrella",
            "Sunscreen",
            "Water bottle",
        ],
        rainfall: "High",
        sunlight: "12-13 hours",
        note: None,
    },
    SeasonEntry {
        destination: "islamabad",
        season: Season::Winter,
        temperature: "3-17°C",
        conditions: "Cool with occasional rain",
        packing: &["Warm jacket", "Sweaters", "Closed shoes"],
        rainfall: "Low to Moderate",
        sunlight: "9-10 hours",
        note: None,
    },
    SeasonEntry {
        destination: "karachi",
        season: Season::Winter,
        temperature: "13-27°C",
        conditions: "Mild and dry",
        packing: &["Light jacket", "Cotton clothing", "Sunglasses"],
        rainfall: "Low",
        sunlight: "10-11 hours",
        note: Some("Winter (November-March)"),
    },
    SeasonEntry {
        destination: "karachi",
        season: Season::Summer,
        temperature: "28-35°C",
        conditions: "Hot and humid with sea breeze",
        packing: &[
            "Light breathable clothing",
            "Sunscreen",
            "Hat",
            "Water bottle",
        ],
        rainfall: "Low to Moderate",
        sunlight: "11-12 hours",
        note: Some("Summer (April-October)"),
    },
    SeasonEntry {
        destination: "lahore",
        season: Season::Winter,
        temperature: "6-20°C",
        conditions: "Cool with morning fog",
        packing: &["Warm layers", "Shawl or scarf", "Comfortable shoes"],
        rainfall: "Low",
        sunlight: "9-10 hours",
        note: Some("Winter (November-March)"),
    },
    SeasonEntry {
        destination: "lahore",
        season: Season::Summer,
        temperature: "27-40°C",
        conditions: "Very hot with monsoon rain",
        packing: &["Loose cotton clothing", "Hat", "Sunscreen", "Umbrella"],
        rainfall: "Moderate to High",
        sunlight: "12-13 hours",
        note: Some("Summer (April-October)"),
    },
    SeasonEntry {
        destination: "hunza",
        season: Season::Winter,
        temperature: "-10-5°C",
        conditions: "Freezing with snowfall",
        packing: &[
            "Down jacket",
            "Thermal layers",
            "Insulated boots",
            "Gloves",
        ],
        rainfall: "Low",
        sunlight: "8-9 hours",
        note: Some("Winter (November-March)"),
    },
    SeasonEntry {
        destination: "hunza",
        season: Season::Summer,
        temperature: "12-27°C",
        conditions: "Clear and pleasant",
        packing: &[
            "Light layers",
            "Hiking boots",
            "Sunscreen",
            "Fleece for evenings",
        ],
        rainfall: "Low",
        sunlight: "13-14 hours",
        note: Some("Summer (April-October)"),
    },
    SeasonEntry {
        destination: "swat",
        season: Season::Winter,
        temperature: "-2-12°C",
        conditions: "Cold with snow at altitude",
        packing: &["Warm coat", "Thermal layers", "Snow boots", "Gloves"],
        rainfall: "Moderate",
        sunlight: "9-10 hours",
        note: Some("Winter (November-March)"),
    },
    SeasonEntry {
        destination: "swat",
        season: Season::Summer,
        temperature: "16-30°C",
        conditions: "Mild and green",
        packing: &["Light clothing", "Rain jacket", "Hiking shoes"],
        rainfall: "Moderate",
        sunlight: "13-14 hours",
        note: Some("Summer (April-October)"),
    },
];

fn belongs_to(family: &[&str], destination: &str) -> bool {
    family
        .iter()
        .any(|member| member.eq_ignore_ascii_case(destination))
}

/// Bucket a travel month into the season key used by the destination's climate family.
pub fn season_for(destination: &str, month: Option<Month>) -> Season {
    let destination = destination.trim();

    if belongs_to(TROPICAL_DESTINATIONS, destination) {
        return match month {
            Some(
                Month::April
                | Month::May
                | Month::June
                | Month::July
                | Month::August
                | Month::September,
            ) => Season::Dry,
            _ => Season::Wet,
        };
    }

    if belongs_to(TWO_SEASON_DESTINATIONS, destination) {
        return match month {
            Some(
                Month::November | Month::December | Month::January | Month::February | Month::March,
            ) => Season::Winter,
            _ => Season::Summer,
        };
    }

    match month {
        Some(Month::December | Month::January | Month::February) => Season::Winter,
        Some(Month::March | Month::April | Month::May) => Season::Spring,
        Some(Month::June | Month::July | Month::August) => Season::Summer,
        Some(Month::September | Month::October | Month::November) => Season::Autumn,
        None => Season::Spring,
    }
}

/// Seasonal weather for a destination; unknown destinations or seasons get the generic profile.
pub fn lookup(destination: &str, travel_month: Option<&str>) -> WeatherReport {
    let month = travel_month.and_then(Month::parse);
    let season = season_for(destination, month);
    let wanted = destination.trim();

    let entry = SEASONS
        .iter()
        .find(|entry| entry.season == season && entry.destination.eq_ignore_ascii_case(wanted));

    match entry {
        Some(entry) => WeatherReport {
            destination: destination.to_string(),
            travel_month: travel_month.map(str::to_string),
            season,
            temperature: entry.temperature.to_string(),
            conditions: entry.conditions.to_string(),
            packing_recommendations: entry.packing.iter().map(|s| s.to_string()).collect(),
            average_rainfall: entry.rainfall.to_string(),
            daily_sunlight: entry.sunlight.to_string(),
            special_notes: entry.note.map(str::to_string),
            is_fallback: false,
        },
        None => {
            debug!(
                target: "tripplanner::catalog",
                destination,
                season = season.as_str(),
                "no seasonal weather entry, using generic profile"
            );
            fallback(destination, travel_month, season)
        }
    }
}

fn fallback(destination: &str, travel_month: Option<&str>, season: Season) -> WeatherReport {
    WeatherReport {
        destination: destination.to_string(),
        travel_month: travel_month.map(str::to_string),
        season,
        temperature: "15-25°C".to_string(),
        conditions: "Moderate weather conditions".to_string(),
        packing_recommendations: vec![
            "Versatile clothing".to_string(),
            "Comfortable shoes".to_string(),
            "Light jacket".to_string(),
        ],
        average_rainfall: "Moderate".to_string(),
        daily_sunlight: "10-12 hours".to_string(),
        special_notes: Some("Check local weather forecast before travel".to_string()),
        is_fallback: true,
    }
}
