//! Final report assembly.
//!
//! Pure formatting over a plan snapshot: each section prints its data, or the
//! error of the tool that should have produced it.

use super::state::{PlanState, ToolFailure};
use crate::{
    tools::ToolKind,
    types::{BudgetBreakdown, DailyPlanEntry, DestinationResearch, TripRequest, WeatherReport},
};

/// Render the Markdown travel report for a request from the given snapshot.
pub fn synthesize(request: &TripRequest, state: &PlanState) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut inline: Vec<&ToolFailure> = Vec::new();

    parts.push(format!(
        "# 🌍 {} TRAVEL PLAN",
        request.destination.trim().to_uppercase()
    ));

    section(
        &mut parts,
        &mut inline,
        state,
        None,
        ToolKind::ResearchDestination,
        state.research.as_ref(),
        overview,
    );
    section(
        &mut parts,
        &mut inline,
        state,
        Some("## 📅 DAILY ITINERARY"),
        ToolKind::BuildDailyItinerary,
        state.itinerary.as_deref(),
        itinerary,
    );
    section(
        &mut parts,
        &mut inline,
        state,
        Some("## 💰 BUDGET BREAKDOWN"),
        ToolKind::CalculateBudgetBreakdown,
        state.budget.as_ref(),
        budget,
    );
    section(
        &mut parts,
        &mut inline,
        state,
        Some("## 🌤️ WEATHER & PACKING"),
        ToolKind::GetSeasonalWeather,
        state.weather.as_ref(),
        weather,
    );

    let leftover: Vec<&ToolFailure> = state
        .failures
        .iter()
        .filter(|failure| !inline.iter().any(|shown| std::ptr::eq(*shown, *failure)))
        .collect();
    if !leftover.is_empty() {
        parts.push("## ⚠️ TOOL ERRORS".to_string());
        for failure in leftover {
            parts.push(format!(
                "- `{}` ({}): {}",
                failure.tool_name, failure.tool_call_id, failure.message
            ));
        }
        parts.push(String::new());
    }

    while parts.last().is_some_and(|line| line.is_empty()) {
        parts.pop();
    }
    parts.join("\n")
}

fn section<'a, T: ?Sized>(
    parts: &mut Vec<String>,
    inline: &mut Vec<&'a ToolFailure>,
    state: &'a PlanState,
    heading: Option<&str>,
    tool: ToolKind,
    data: Option<&T>,
    render: fn(&T, &mut Vec<String>),
) {
    let failure = state.failure_for(tool);
    if data.is_none() && failure.is_none() {
        return;
    }

    if let Some(heading) = heading {
        parts.push(heading.to_string());
    }
    match (data, failure) {
        (Some(data), _) => render(data, parts),
        (None, Some(failure)) => {
            parts.push(format!("⚠️ **{} failed**: {}", failure.tool_name, failure.message));
            inline.push(failure);
        }
        (None, None) => {}
    }
    parts.push(String::new());
}

fn overview(research: &DestinationResearch, parts: &mut Vec<String>) {
    let profile = &research.profile;
    parts.push(format!("**Description**: {}", profile.description));
    parts.push(format!("**Best Season**: {}", profile.best_season));
    parts.push(format!("**Cost Level**: {}", profile.cost_level));
    parts.push(format!(
        "**Key Attractions**: {}",
        profile.attractions.join(", ")
    ));
    if !research.recommended_activities.is_empty() {
        parts.push(format!(
            "**Recommended Activities**: {}",
            research.recommended_activities.join(", ")
        ));
    }
}

fn itinerary(days: &[DailyPlanEntry], parts: &mut Vec<String>) {
    for (idx, day) in days.iter().enumerate() {
        if idx > 0 {
            parts.push(String::new());
        }
        parts.push(format!("### Day {}", day.day));
        parts.push(format!("- **Morning**: {}", day.morning));
        parts.push(format!("- **Afternoon**: {}", day.afternoon));
        parts.push(format!("- **Evening**: {}", day.evening));
        if !day.meals.is_empty() {
            parts.push(format!("- **Meals**: {}", day.meals));
        }
        if !day.accommodation_type.is_empty() {
            parts.push(format!("- **Accommodation**: {}", day.accommodation_type));
        }
    }
}

fn budget(breakdown: &BudgetBreakdown, parts: &mut Vec<String>) {
    parts.push(format!("**Total Budget**: ${:.2}", breakdown.total_budget));
    parts.push(format!("**Budget Level**: {}", breakdown.budget_level));
    parts.push(format!("**Daily Budget**: ${:.2}", breakdown.budget_per_day));
    parts.push(format!("**Per Person**: ${:.2}", breakdown.budget_per_person));
    parts.push(String::new());
    parts.push("**Category Breakdown**:".to_string());
    for slice in breakdown.slices() {
        parts.push(format!("- {}: ${:.2}", slice.label, slice.amount));
    }
}

fn weather(report: &WeatherReport, parts: &mut Vec<String>) {
    parts.push(format!("**Season**: {}", report.season));
    parts.push(format!("**Temperature**: {}", report.temperature));
    parts.push(format!("**Conditions**: {}", report.conditions));
    parts.push(format!("**Rainfall**: {}", report.average_rainfall));
    parts.push(format!("**Sunlight**: {}", report.daily_sunlight));
    if let Some(note) = &report.special_notes {
        parts.push(format!("**Note**: {}", note));
    }
    parts.push(String::new());
    parts.push("**Packing Recommendations**:".to_string());
    for item in &report.packing_recommendations {
        parts.push(format!("- {}", item));
    }
}
