//! Static destination catalog.

use crate::types::{CostLevel, DestinationProfile, DestinationResearch};
use tracing::debug;

const DEFAULT_INTEREST: &str = "sightseeing";

struct DestinationEntry {
    key: &'static str,
    attractions: &'static [&'static str],
    activities: &'static [&'static str],
    best_season: &'static str,
    cost_level: CostLevel,
    description: &'static str,
}

static DESTINATIONS: &[DestinationEntry] = &[
    DestinationEntry {
        key: "paris",
        attractions: &[
            "Eiffel Tower",
            "Louvre Museum",
            "Notre-Dame",
            "Montmartre",
            "Seine River Cruise",
        ],
        activities: &[
            "Museum tours",
            "River cruise",
            "Food tasting",
            "Shopping",
            "Photography",
        ],
        best_season: "Spring (March-May)",
        cost_level: CostLevel::Medium,
        description: "City of Lights with rich history and culture",
    },
    DestinationEntry {
        key: "tokyo",
        attractions: &[
            "Sensoji Temple",
            "Tokyo Skytree",
            "Shibuya Crossing",
            "Meiji Shrine",
            "Akihabara",
        ],
        activities: &[
            "Temple visits",
            "Sushi making",
            "Anime shopping",
            "Gardens",
            "Karaoke",
        ],
        best_season: "Autumn (September-November)",
        cost_level: CostLevel::High,
        description: "Blend of traditional and ultra-modern experiences",
    },
    DestinationEntry {
        key: "bali",
        attractions: &[
            "Uluwatu Temple",
            "Tegallalang Rice Terrace",
            "Ubud Monkey Forest",
            "Waterfalls",
            "Beaches",
        ],
        activities: &[
            "Beach relaxation",
            "Temple tours",
            "Yoga classes",
            "Water sports",
            "Spa treatments",
        ],
        best_season: "Dry season (April-October)",
        cost_level: CostLevel::Low,
        description: "Tropical paradise with rich culture and nature",
    },
    DestinationEntry {
        key: "islamabad",
        attractions: &[
            "Faisal Mosque",
            "Daman-e-Koh",
            "Pakistan Monument",
            "Lok Virsa Museum",
            "Margalla Hills",
        ],
        activities: &[
            "Hiking trails",
            "Mosque visits",
            "Museum tours",
            "Local cuisine",
            "Shopping",
        ],
        best_season: "Spring (March-April) and Autumn (October-November)",
        cost_level: CostLevel::Low,
        description: "Green capital city framed by the Margalla Hills",
    },
    DestinationEntry {
        key: "karachi",
        attractions: &[
            "Clifton Beach",
            "Quaid-e-Azam Mausoleum",
            "Mohatta Palace",
            "Port Grand",
            "Frere Hall",
        ],
        activities: &[
            "Beach walks",
            "Seafood tasting",
            "Shopping",
            "Museum tours",
            "Boat trips",
        ],
        best_season: "Winter (November-February)",
        cost_level: CostLevel::Low,
        description: "Coastal metropolis and commercial heart of Pakistan",
    },
    DestinationEntry {
        key: "lahore",
        attractions: &[
            "Badshahi Mosque",
            "Lahore Fort",
            "Shalimar Gardens",
            "Walled City",
            "Wagah Border",
        ],
        activities: &[
            "Food street tours",
            "Mughal architecture tours",
            "Gardens",
            "Shopping",
            "Cultural performances",
        ],
        best_season: "Winter (November-February)",
        cost_level: CostLevel::Low,
        description: "Cultural capital famous for Mughal heritage and food",
    },
    DestinationEntry {
        key: "hunza",
        attractions: &[
            "Baltit Fort",
            "Altit Fort",
            "Attabad Lake",
            "Passu Cones",
            "Eagle's Nest",
        ],
        activities: &[
            "Hiking",
            "Lake boating",
            "Photography",
            "Fort tours",
            "Stargazing",
        ],
        best_season: "Late spring to autumn (May-October)",
        cost_level: CostLevel::Low,
        description: "High mountain valley surrounded by Karakoram peaks",
    },
    DestinationEntry {
        key: "swat",
        attractions: &[
            "Malam Jabba",
            "Kalam Valley",
            "Mahodand Lake",
            "Mingora Bazaar",
            "Swat Museum",
        ],
        activities: &[
            "Skiing",
            "River rafting",
            "Hiking",
            "Trout fishing",
            "Museum tours",
        ],
        best_season: "Summer (May-September)",
        cost_level: CostLevel::Low,
        description: "Alpine valley known as the Switzerland of the East",
    },
];

static FALLBACK: DestinationEntry = DestinationEntry {
    key: "",
    attractions: &[
        "City Center",
        "Local Markets",
        "Historical Sites",
        "Main Square",
    ],
    activities: &[
        "Sightseeing",
        "Local cuisine",
        "Cultural experiences",
        "Shopping",
    ],
    best_season: "All year",
    cost_level: CostLevel::Medium,
    description: "Popular travel destination with diverse experiences",
};

fn find(name: &str) -> Option<&'static DestinationEntry> {
    let wanted = name.trim();
    DESTINATIONS
        .iter()
        .find(|entry| entry.key.eq_ignore_ascii_case(wanted))
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Names of every destination with a dedicated catalog entry.
pub fn known_destinations() -> impl Iterator<Item = &'static str> {
    DESTINATIONS.iter().map(|entry| entry.key)
}

pub fn is_known(name: &str) -> bool {
    find(name).is_some()
}

/// Case-insensitive lookup; unknown destinations get the generic profile.
pub fn lookup(name: &str) -> DestinationProfile {
    let entry = find(name).unwrap_or_else(|| {
        debug!(
            target: "tripplanner::catalog",
            destination = name,
            "no catalog entry, using generic destination profile"
        );
        &FALLBACK
    });

    DestinationProfile {
        name: name.trim().to_string(),
        attractions: owned(entry.attractions),
        activities: owned(entry.activities),
        best_season: entry.best_season.to_string(),
        cost_level: entry.cost_level,
        description: entry.description.to_string(),
    }
}

/// Activities whose lowercase text contains any interest tag, in catalog order.
pub fn filter_activities_by_interest(
    profile: &DestinationProfile,
    interests: &[String],
) -> Vec<String> {
    let tags = normalized_interests(interests);

    profile
        .activities
        .iter()
        .filter(|activity| {
            let activity = activity.to_lowercase();
            tags.iter().any(|tag| activity.contains(tag.as_str()))
        })
        .cloned()
        .collect()
}

fn normalized_interests(interests: &[String]) -> Vec<String> {
    let tags: Vec<String> = interests
        .iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect();

    if tags.is_empty() {
        vec![DEFAULT_INTEREST.to_string()]
    } else {
        tags
    }
}

/// Profile lookup plus interest filtering in one step.
pub fn research(name: &str, interests: &[String]) -> DestinationResearch {
    let profile = lookup(name);
    let recommended_activities = filter_activities_by_interest(&profile, interests);

    DestinationResearch {
        profile,
        interests: normalized_interests(interests),
        recommended_activities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_destinations_have_attractions() {
        for name in known_destinations() {
            let profile = lookup(name);
            assert!(!profile.attractions.is_empty(), "{} has no attractions", name);
            assert!(!profile.activities.is_empty(), "{} has no activities", name);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let profile = lookup("PaRiS");
        assert_eq!(profile.attractions[0], "Eiffel Tower");
        assert_eq!(profile.cost_level, CostLevel::Medium);
        assert_eq!(profile.name, "PaRiS");
        assert!(is_known(" tokyo "));
    }

    #[test]
    fn test_unknown_destination_uses_generic_profile() {
        let profile = lookup("Atlantis");
        assert_eq!(
            profile.attractions,
            vec!["City Center", "Local Markets", "Historical Sites", "Main Square"]
        );
        assert_eq!(profile.best_season, "All year");
        assert!(!is_known("Atlantis"));
    }

    #[test]
    fn test_interest_filter_preserves_order() {
        let profile = lookup("paris");
        let interests = vec!["photo".to_string(), "museum".to_string()];
        assert_eq!(
            filter_activities_by_interest(&profile, &interests),
            vec!["Museum tours", "Photography"]
        );
    }

    #[test]
    fn test_interest_filter_defaults_to_sightseeing() {
        let profile = lookup("Atlantis");
        assert_eq!(filter_activities_by_interest(&profile, &[]), vec!["Sightseeing"]);

        let paris = lookup("paris");
        assert!(filter_activities_by_interest(&paris, &[]).is_empty());
    }

    #[test]
    fn test_interest_tags_are_case_insensitive() {
        let research = research("Bali", &["YOGA".to_string()]);
        assert_eq!(research.recommended_activities, vec!["Yoga classes"]);
        assert_eq!(research.interests, vec!["yoga"]);
    }

    #[test]
    fn test_lookup_is_idempotent() {
        assert_eq!(lookup("Hunza"), lookup("Hunza"));
    }
}
