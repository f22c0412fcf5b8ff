//! Chart rendering for itinerary maps and budget charts.
//!
//! Renderers return images as data-URIs so they can travel inside JSON tool
//! observations and be embedded directly by whatever displays the plan.

use crate::{
    error::{PlannerError, Result},
    types::{BudgetSlice, DailyPlanEntry},
};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use std::f64::consts::PI;

const SVG_MIME: &str = "image/svg+xml";
const PALETTE: [&str; 6] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFE66D", "#6A0572",
];
const MAX_LISTED_ATTRACTIONS: usize = 4;
const ACTIVITY_PREVIEW_CHARS: usize = 25;

/// Turns computed plan data into images.
pub trait ChartRenderer: Send + Sync + std::fmt::Debug {
    /// Day-by-day timeline for a destination
    fn render_itinerary_map(
        &self,
        destination: &str,
        itinerary: &[DailyPlanEntry],
        attractions: &[String],
    ) -> Result<String>;

    /// Category split of the whole budget, with optional per-day allocations
    fn render_budget_chart(&self, allocations: &[BudgetSlice], daily: &[BudgetSlice])
        -> Result<String>;
}

/// Renders charts as SVG documents.
#[derive(Debug, Default, Clone)]
pub struct SvgChartRenderer;

impl SvgChartRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render_itinerary_map(
        &self,
        destination: &str,
        itinerary: &[DailyPlanEntry],
        attractions: &[String],
    ) -> Result<String> {
        if itinerary.is_empty() {
            return Err(PlannerError::Render(
                "cannot draw an itinerary map without any days".to_string(),
            ));
        }

        let listed = attractions.len().min(MAX_LISTED_ATTRACTIONS);
        let timeline_top = 200.0;
        let day_height = 80.0;
        let attractions_top = timeline_top + itinerary.len() as f64 * day_height + 20.0;
        let height = attractions_top + if listed > 0 { 40.0 + listed as f64 * 22.0 } else { 0.0 };
        let title = escape(&destination.to_uppercase());

        let mut svg = svg_open(960.0, height, "#F8F9FA");
        svg.push_str(&format!(
            r##"<text x="480" y="40" text-anchor="middle" font-size="24" font-weight="bold" fill="#343A40">{} TRAVEL ITINERARY</text>"##,
            title
        ));
        svg.push_str(&format!(
            r##"<circle cx="480" cy="120" r="55" fill="{}" stroke="white" stroke-width="3" opacity="0.85"/>"##,
            PALETTE[1]
        ));
        svg.push_str(&format!(
            r##"<text x="480" y="126" text-anchor="middle" font-size="16" font-weight="bold" fill="white">{}</text>"##,
            title
        ));

        for (idx, day) in itinerary.iter().enumerate() {
            let y = timeline_top + idx as f64 * day_height;
            svg.push_str(&format!(
                r##"<rect x="60" y="{:.1}" width="840" height="66" rx="8" fill="#E9ECEF" stroke="#495057" stroke-width="1.5"/>"##,
                y
            ));
            svg.push_str(&format!(
                r##"<text x="80" y="{:.1}" font-size="15" font-weight="bold" fill="#495057">DAY {}</text>"##,
                y + 38.0,
                day.day
            ));

            let slots = [
                ("Morning", &day.morning),
                ("Afternoon", &day.afternoon),
                ("Evening", &day.evening),
            ];
            for (slot_idx, (label, text)) in slots.iter().enumerate() {
                svg.push_str(&format!(
                    r##"<text x="180" y="{:.1}" font-size="12" fill="#6C757D">{}: {}</text>"##,
                    y + 18.0 + slot_idx as f64 * 18.0,
                    label,
                    escape(&preview(text))
                ));
            }
        }

        if listed > 0 {
            svg.push_str(&format!(
                r##"<text x="60" y="{:.1}" font-size="15" font-weight="bold" fill="#495057">KEY ATTRACTIONS</text>"##,
                attractions_top + 10.0
            ));
            for (idx, attraction) in attractions.iter().take(listed).enumerate() {
                svg.push_str(&format!(
                    r##"<text x="70" y="{:.1}" font-size="12" fill="#6C757D">• {}</text>"##,
                    attractions_top + 34.0 + idx as f64 * 22.0,
                    escape(attraction)
                ));
            }
        }

        svg.push_str("</svg>");
        Ok(to_data_uri(&svg))
    }

    fn render_budget_chart(
        &self,
        allocations: &[BudgetSlice],
        daily: &[BudgetSlice],
    ) -> Result<String> {
        let total = checked_total(allocations)?;
        if !daily.is_empty() {
            checked_total(daily)?;
        }

        let width = if daily.is_empty() { 520.0 } else { 1000.0 };
        let mut svg = svg_open(width, 520.0, "#F8F9FA");
        svg.push_str(
            r##"<text x="260" y="40" text-anchor="middle" font-size="20" font-weight="bold" fill="#343A40">Trip Budget Breakdown</text>"##,
        );

        let (cx, cy, radius) = (260.0, 230.0, 150.0);
        let mut start = -PI / 2.0;
        for (idx, slice) in allocations.iter().enumerate() {
            let fraction = slice.amount / total;
            let color = PALETTE[idx % PALETTE.len()];
            if fraction >= 0.9999 {
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    cx, cy, radius, color
                ));
            } else if fraction > 0.0 {
                let end = start + fraction * 2.0 * PI;
                let large_arc = if fraction > 0.5 { 1 } else { 0 };
                svg.push_str(&format!(
                    r#"<path d="M {cx} {cy} L {:.2} {:.2} A {radius} {radius} 0 {large_arc} 1 {:.2} {:.2} Z" fill="{color}" stroke="white" stroke-width="2"/>"#,
                    cx + radius * start.cos(),
                    cy + radius * start.sin(),
                    cx + radius * end.cos(),
                    cy + radius * end.sin(),
                ));
                start = end;
            }

            let legend_y = 410.0 + idx as f64 * 18.0;
            let column_x = if idx < 3 { 40.0 } else { 280.0 };
            let row_y = if idx < 3 { legend_y } else { legend_y - 54.0 };
            svg.push_str(&format!(
                r#"<rect x="{column_x}" y="{:.1}" width="12" height="12" fill="{color}"/>"#,
                row_y - 10.0
            ));
            svg.push_str(&format!(
                r##"<text x="{:.1}" y="{:.1}" font-size="12" fill="#343A40">{} ({:.1}%)</text>"##,
                column_x + 18.0,
                row_y,
                escape(&slice.label),
                fraction * 100.0
            ));
        }

        if !daily.is_empty() {
            svg.push_str(&bar_chart(daily, 560.0, 900.0));
        }

        svg.push_str("</svg>");
        Ok(to_data_uri(&svg))
    }
}

fn bar_chart(daily: &[BudgetSlice], left: f64, right: f64) -> String {
    let mut svg = String::new();
    let (top, bottom) = (90.0, 400.0);
    let max = daily
        .iter()
        .map(|slice| slice.amount)
        .fold(0.0_f64, f64::max);
    let slot = (right - left) / daily.len() as f64;
    let bar_width = slot * 0.6;

    svg.push_str(&format!(
        r##"<text x="{:.1}" y="40" text-anchor="middle" font-size="20" font-weight="bold" fill="#343A40">Daily Budget Allocation</text>"##,
        (left + right) / 2.0
    ));
    svg.push_str(&format!(
        r##"<line x1="{left}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="#495057"/>"##
    ));

    for (idx, slice) in daily.iter().enumerate() {
        let height = if max > 0.0 {
            (slice.amount / max) * (bottom - top)
        } else {
            0.0
        };
        let x = left + idx as f64 * slot + (slot - bar_width) / 2.0;
        let center = x + bar_width / 2.0;
        svg.push_str(&format!(
            r##"<rect x="{x:.1}" y="{:.1}" width="{bar_width:.1}" height="{height:.1}" fill="#4ECDC4" opacity="0.8"/>"##,
            bottom - height
        ));
        svg.push_str(&format!(
            r##"<text x="{center:.1}" y="{:.1}" text-anchor="middle" font-size="11" font-weight="bold" fill="#343A40">${:.2}</text>"##,
            bottom - height - 6.0,
            slice.amount
        ));
        svg.push_str(&format!(
            r##"<text x="{center:.1}" y="{:.1}" text-anchor="end" font-size="11" fill="#495057" transform="rotate(-45 {center:.1} {:.1})">{}</text>"##,
            bottom + 16.0,
            bottom + 16.0,
            escape(&slice.label)
        ));
    }

    svg
}

fn checked_total(slices: &[BudgetSlice]) -> Result<f64> {
    if slices.is_empty() {
        return Err(PlannerError::Render(
            "cannot draw a budget chart without categories".to_string(),
        ));
    }
    if let Some(bad) = slices
        .iter()
        .find(|slice| !slice.amount.is_finite() || slice.amount < 0.0)
    {
        return Err(PlannerError::Render(format!(
            "budget category '{}' has an invalid amount {}",
            bad.label, bad.amount
        )));
    }

    let total: f64 = slices.iter().map(|slice| slice.amount).sum();
    if total <= 0.0 {
        return Err(PlannerError::Render(
            "budget chart amounts add up to zero".to_string(),
        ));
    }
    Ok(total)
}

fn svg_open(width: f64, height: f64, background: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="Helvetica, Arial, sans-serif"><rect width="100%" height="100%" fill="{background}"/>"#
    )
}

fn preview(text: &str) -> String {
    if text.chars().count() <= ACTIVITY_PREVIEW_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(ACTIVITY_PREVIEW_CHARS).collect();
    format!("{}...", head)
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn to_data_uri(svg: &str) -> String {
    format!("data:{};base64,{}", SVG_MIME, BASE64_STANDARD.encode(svg))
}

/// Decode a data-URI produced by a renderer back into its document text.
pub fn decode_data_uri(uri: &str) -> Result<String> {
    let (_, payload) = uri
        .split_once(";base64,")
        .ok_or_else(|| PlannerError::Render("not a base64 data-URI".to_string()))?;
    let bytes = BASE64_STANDARD
        .decode(payload)
        .map_err(|err| PlannerError::Render(format!("invalid base64 payload: {}", err)))?;
    String::from_utf8(bytes)
        .map_err(|err| PlannerError::Render(format!("data-URI is not UTF-8 text: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{budget, itinerary, types::TravelStyle};

    #[test]
    fn test_budget_chart_is_svg_data_uri() {
        let breakdown = budget::allocate("paris", 3, 1500.0, TravelStyle::Cultural, 2).unwrap();
        let uri = SvgChartRenderer::new()
            .render_budget_chart(&breakdown.slices(), &breakdown.daily_slices())
            .unwrap();

        assert!(uri.starts_with("data:image/svg+xml;base64,"));
        let svg = decode_data_uri(&uri).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Trip Budget Breakdown"));
        assert!(svg.contains("Daily Budget Allocation"));
        assert!(svg.contains("Accommodation (35.0%)"));
        assert!(svg.contains("$175.00"));
    }

    #[test]
    fn test_itinerary_map_lists_days_and_attractions() {
        let attractions: Vec<String> = ["Eiffel Tower", "Louvre Museum", "Notre-Dame", "Montmartre", "Seine River Cruise"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let days = itinerary::build("Paris", 2, TravelStyle::Mixed, &attractions).unwrap();
        let uri = SvgChartRenderer::new()
            .render_itinerary_map("Paris", &days, &attractions)
            .unwrap();

        let svg = decode_data_uri(&uri).unwrap();
        assert!(svg.contains("PARIS TRAVEL ITINERARY"));
        assert!(svg.contains("DAY 2"));
        assert!(svg.contains("Montmartre"));
        assert!(!svg.contains("Seine River Cruise"));
    }

    #[test]
    fn test_text_is_escaped() {
        let days = itinerary::build("R&D <City>", 1, TravelStyle::Mixed, &[]).unwrap();
        let uri = SvgChartRenderer::new()
            .render_itinerary_map("R&D <City>", &days, &[])
            .unwrap();
        let svg = decode_data_uri(&uri).unwrap();
        assert!(svg.contains("R&amp;D &lt;CITY&gt;"));
    }

    #[test]
    fn test_invalid_inputs_fail() {
        let renderer = SvgChartRenderer::new();
        assert!(matches!(
            renderer.render_itinerary_map("Paris", &[], &[]),
            Err(PlannerError::Render(_))
        ));
        assert!(renderer.render_budget_chart(&[], &[]).is_err());

        let zero = vec![BudgetSlice {
            label: "Accommodation".to_string(),
            amount: 0.0,
        }];
        assert!(renderer.render_budget_chart(&zero, &[]).is_err());
    }

    #[test]
    fn test_single_slice_draws_full_circle() {
        let whole = vec![BudgetSlice {
            label: "Everything".to_string(),
            amount: 10.0,
        }];
        let uri = SvgChartRenderer::new().render_budget_chart(&whole, &[]).unwrap();
        let svg = decode_data_uri(&uri).unwrap();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("Everything (100.0%)"));
    }
}
