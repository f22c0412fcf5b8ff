use crate::{tools::ToolKind, types::TripRequest};

pub const SYSTEM_PROMPT: &str = "You are a travel planning assistant with access to tools. Plan trips by calling the tools that research the destination, check the seasonal weather, calculate the budget breakdown, build the daily itinerary and generate the itinerary map and budget chart. Call every tool you need in a single turn; a report is assembled from the tool results afterwards.";

/// Natural-language instruction sent to the decision oracle for a trip request
pub fn planning_instruction(request: &TripRequest) -> String {
    let steps: Vec<String> = [
        "Research the destination and attractions",
        "Build a daily itinerary",
        "Calculate budget breakdown",
        "Check weather conditions",
        "Generate visualizations",
    ]
    .iter()
    .enumerate()
    .map(|(idx, step)| format!("{}. {}", idx + 1, step))
    .collect();

    format!(
        "Plan a {}-day trip to {} for {} travelers.\nBudget: ${}, Style: {}\nInterests: {}\nTravel Month: {}\n\nAvailable tools:\n{}\n\nPlease use the available tools to:\n{}\n\nReturn a complete travel plan.",
        request.duration,
        request.destination,
        request.traveler_count,
        request.budget,
        request.travel_style,
        request.interests.join(", "),
        request.travel_month,
        tool_summary(),
        steps.join("\n")
    )
}

fn tool_summary() -> String {
    ToolKind::ALL
        .iter()
        .map(|kind| format!("- {}: {}", kind.name(), kind.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TravelStyle;

    #[test]
    fn test_instruction_mentions_request_fields() {
        let request = TripRequest::new("Paris", 3, 1500.0)
            .with_travel_style(TravelStyle::Cultural)
            .with_traveler_count(2)
            .with_interests(["museums", "food"]);
        let instruction = planning_instruction(&request);

        assert!(instruction.starts_with("Plan a 3-day trip to Paris for 2 travelers."));
        assert!(instruction.contains("Budget: $1500, Style: cultural"));
        assert!(instruction.contains("Interests: museums, food"));
        assert!(instruction.contains("Travel Month: May"));
        assert!(instruction.contains("5. Generate visualizations"));
    }

    #[test]
    fn test_instruction_lists_every_tool() {
        let instruction = planning_instruction(&TripRequest::new("Bali", 5, 2000.0));
        for kind in ToolKind::ALL {
            assert!(instruction.contains(kind.name()), "missing {}", kind);
        }
    }
}
