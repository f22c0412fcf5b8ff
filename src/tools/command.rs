use super::{
    params::{
        BudgetChartParams, BudgetParams, ItineraryMapParams, ItineraryParams, ResearchParams,
        WeatherParams,
    },
    validation::{deserialize_arguments, validate_arguments},
    ToolKind,
};
use crate::{
    budget,
    catalog::{destinations, weather},
    core::{state::PlanDelta, state::PlanState, tool_call::ToolCall},
    error::{PlannerError, Result},
    itinerary,
    render::ChartRenderer,
    types::BudgetSlice,
};
use tracing::debug;

/// A parsed, validated tool invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCommand {
    Research(ResearchParams),
    Weather(WeatherParams),
    Budget(BudgetParams),
    Itinerary(ItineraryParams),
    ItineraryMap(ItineraryMapParams),
    BudgetChart(BudgetChartParams),
}

impl ToolCommand {
    /// Resolve the tool by name and type-check its arguments.
    pub fn parse(call: &ToolCall) -> Result<Self> {
        let kind = ToolKind::from_name(&call.name)
            .ok_or_else(|| PlannerError::ToolNotFound(call.name.clone()))?;

        validate_arguments(kind, &call.arguments)?;
        let arguments = call.arguments.clone();

        let command = match kind {
            ToolKind::ResearchDestination => {
                ToolCommand::Research(deserialize_arguments(kind, arguments)?)
            }
            ToolKind::GetSeasonalWeather => {
                ToolCommand::Weather(deserialize_arguments(kind, arguments)?)
            }
            ToolKind::CalculateBudgetBreakdown => {
                ToolCommand::Budget(deserialize_arguments(kind, arguments)?)
            }
            ToolKind::BuildDailyItinerary => {
                ToolCommand::Itinerary(deserialize_arguments(kind, arguments)?)
            }
            ToolKind::GenerateItineraryMap => {
                ToolCommand::ItineraryMap(deserialize_arguments(kind, arguments)?)
            }
            ToolKind::GenerateBudgetChart => {
                ToolCommand::BudgetChart(deserialize_arguments(kind, arguments)?)
            }
        };

        Ok(command)
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolCommand::Research(_) => ToolKind::ResearchDestination,
            ToolCommand::Weather(_) => ToolKind::GetSeasonalWeather,
            ToolCommand::Budget(_) => ToolKind::CalculateBudgetBreakdown,
            ToolCommand::Itinerary(_) => ToolKind::BuildDailyItinerary,
            ToolCommand::ItineraryMap(_) => ToolKind::GenerateItineraryMap,
            ToolCommand::BudgetChart(_) => ToolKind::GenerateBudgetChart,
        }
    }

    /// Run the command against the current snapshot, producing the delta to fold in.
    pub fn execute(self, snapshot: &PlanState, renderer: &dyn ChartRenderer) -> Result<PlanDelta> {
        debug!(target: "tripplanner::tools", tool = %self.kind(), "executing tool");

        match self {
            ToolCommand::Research(params) => Ok(PlanDelta::Research(destinations::research(
                &params.destination,
                &params.interests,
            ))),
            ToolCommand::Weather(params) => Ok(PlanDelta::Weather(weather::lookup(
                &params.destination,
                params.travel_month.as_deref(),
            ))),
            ToolCommand::Budget(params) => budget::allocate(
                &params.destination,
                params.duration,
                params.total_budget,
                params.travel_style.unwrap_or_default(),
                params.traveler_count.unwrap_or(1),
            )
            .map(PlanDelta::Budget),
            ToolCommand::Itinerary(params) => {
                let attractions = params
                    .attractions
                    .or_else(|| snapshot.attractions().map(<[String]>::to_vec))
                    .unwrap_or_default();

                itinerary::build(
                    &params.destination,
                    params.duration,
                    params.travel_style.unwrap_or_default(),
                    &attractions,
                )
                .map(PlanDelta::Itinerary)
            }
            ToolCommand::ItineraryMap(params) => {
                let days = match params.itinerary {
                    Some(days) => days,
                    None => snapshot.itinerary.clone().ok_or_else(|| {
                        PlannerError::ToolExecution(
                            "no itinerary to draw; call build_daily_itinerary first or pass one"
                                .to_string(),
                        )
                    })?,
                };
                let attractions = params
                    .attractions
                    .or_else(|| snapshot.attractions().map(<[String]>::to_vec))
                    .unwrap_or_default();

                renderer
                    .render_itinerary_map(&params.destination, &days, &attractions)
                    .map(PlanDelta::ItineraryMap)
            }
            ToolCommand::BudgetChart(params) => {
                let (allocations, daily) = match params.budget_breakdown {
                    Some(amounts) => {
                        let slices = amounts
                            .into_iter()
                            .map(|(key, amount)| BudgetSlice {
                                label: humanize(&key),
                                amount,
                            })
                            .collect();
                        (slices, Vec::new())
                    }
                    None => {
                        let breakdown = snapshot.budget.as_ref().ok_or_else(|| {
                            PlannerError::ToolExecution(
                                "no budget breakdown to chart; call calculate_budget_breakdown first or pass one"
                                    .to_string(),
                            )
                        })?;
                        (breakdown.slices(), breakdown.daily_slices())
                    }
                };

                renderer
                    .render_budget_chart(&allocations, &daily)
                    .map(PlanDelta::BudgetChart)
            }
        }
    }
}

/// `food_dining` -> `Food Dining`
fn humanize(key: &str) -> String {
    key.split(|ch: char| ch == '_' || ch.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
