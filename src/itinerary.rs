//! Round-robin itinerary templating.

use crate::{
    error::Result,
    types::{request::check_duration, DailyPlanEntry, TravelStyle},
};

const GENERIC_ATTRACTIONS: [&str; 3] = ["main attractions", "local experiences", "cultural sites"];
const MEALS: &str =
    "Breakfast at accommodation, Lunch at local restaurant, Dinner at recommended spot";

struct DayTemplate {
    morning: &'static str,
    afternoon: &'static str,
    evening: &'static str,
}

const ADVENTURE: DayTemplate = DayTemplate {
    morning: "Adventure activity and exploration",
    afternoon: "Outdoor experiences and local adventures",
    evening: "Relaxation and local dining",
};

const CULTURAL: DayTemplate = DayTemplate {
    morning: "Museum and historical site visits",
    afternoon: "Cultural workshops and local experiences",
    evening: "Traditional performances and dining",
};

const RELAXATION: DayTemplate = DayTemplate {
    morning: "Spa treatments and leisurely breakfast",
    afternoon: "Beach time or peaceful gardens",
    evening: "Fine dining and sunset views",
};

const MIXED: DayTemplate = DayTemplate {
    morning: "Sightseeing and main attractions",
    afternoon: "Local experiences and exploration",
    evening: "Entertainment and dining",
};

fn template_for(style: TravelStyle) -> &'static DayTemplate {
    match style {
        TravelStyle::Adventure => &ADVENTURE,
        TravelStyle::Cultural => &CULTURAL,
        TravelStyle::Relaxation => &RELAXATION,
        _ => &MIXED,
    }
}

pub fn accommodation_for(style: TravelStyle) -> &'static str {
    if style == TravelStyle::Budget {
        "Hostel/Guesthouse"
    } else {
        "Hotel"
    }
}

/// Build exactly `duration` days, cycling through `attractions`.
pub fn build(
    destination: &str,
    duration: u32,
    style: TravelStyle,
    attractions: &[String],
) -> Result<Vec<DailyPlanEntry>> {
    check_duration(duration)?;

    let generic: Vec<String>;
    let attractions: &[String] = if attractions.is_empty() {
        generic = GENERIC_ATTRACTIONS.iter().map(|s| s.to_string()).collect();
        &generic
    } else {
        attractions
    };

    let template = template_for(style);
    let accommodation = accommodation_for(style);

    let days = (1..=duration)
        .map(|day| {
            let attraction = &attractions[(day as usize - 1) % attractions.len()];
            DailyPlanEntry {
                day,
                attraction: attraction.clone(),
                morning: format!("{} at {}", template.morning, attraction),
                afternoon: format!("{} in {}", template.afternoon, destination),
                evening: format!("{} with local cuisine", template.evening),
                meals: MEALS.to_string(),
                accommodation_type: accommodation.to_string(),
            }
        })
        .collect();

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::PlannerError, types::MAX_TRIP_DAYS};

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cultural_paris_day_one() {
        let attractions = names(&["Eiffel Tower", "Louvre Museum", "Notre-Dame"]);
        let days = build("Paris", 3, TravelStyle::Cultural, &attractions).unwrap();

        assert_eq!(days.len(), 3);
        assert_eq!(
            days[0].morning,
            "Museum and historical site visits at Eiffel Tower"
        );
        assert_eq!(
            days[0].afternoon,
            "Cultural workshops and local experiences in Paris"
        );
        assert_eq!(
            days[0].evening,
            "Traditional performances and dining with local cuisine"
        );
        assert_eq!(days[0].accommodation_type, "Hotel");
    }

    #[test]
    fn test_round_robin_reuse() {
        let attractions = names(&["A", "B", "C"]);
        for duration in 1..=10u32 {
            let days = build("Anywhere", duration, TravelStyle::Mixed, &attractions).unwrap();
            assert_eq!(days.len(), duration as usize);
            for (idx, entry) in days.iter().enumerate() {
                assert_eq!(entry.day, idx as u32 + 1);
                assert_eq!(entry.attraction, attractions[idx % attractions.len()]);
            }
        }
    }

    #[test]
    fn test_empty_attractions_use_generic_list() {
        let days = build("Nowhere", 4, TravelStyle::Adventure, &[]).unwrap();
        assert_eq!(days[0].attraction, "main attractions");
        assert_eq!(days[2].attraction, "cultural sites");
        assert_eq!(days[3].attraction, "main attractions");
        assert!(days[0].morning.starts_with("Adventure activity and exploration"));
    }

    #[test]
    fn test_styles_without_template_use_mixed() {
        let attractions = names(&["Old Town"]);
        let days = build("Riga", 1, TravelStyle::Budget, &attractions).unwrap();
        assert_eq!(days[0].morning, "Sightseeing and main attractions at Old Town");
        assert_eq!(days[0].accommodation_type, "Hostel/Guesthouse");

        let days = build("Riga", 1, TravelStyle::Luxury, &attractions).unwrap();
        assert_eq!(days[0].morning, "Sightseeing and main attractions at Old Town");
        assert_eq!(days[0].accommodation_type, "Hotel");
    }

    #[test]
    fn test_duration_out_of_range_is_rejected() {
        assert!(matches!(
            build("Paris", 0, TravelStyle::Mixed, &[]),
            Err(PlannerError::InvalidArgument(_))
        ));
        assert!(matches!(
            build("Paris", u32::MAX, TravelStyle::Mixed, &[]),
            Err(PlannerError::InvalidArgument(_))
        ));
        assert_eq!(
            build("Paris", MAX_TRIP_DAYS, TravelStyle::Mixed, &[])
                .unwrap()
                .len(),
            MAX_TRIP_DAYS as usize
        );
    }
}
