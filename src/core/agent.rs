use super::{
    memory::PlanMemory,
    oracle::{DecisionOracle, OpenAIOracle, ScriptedOracle},
    state::{PlanState, PlanStatus, ToolFailure},
    steps::PlanStep,
    synthesis::synthesize,
    tool_call::{ToolCall, ToolExecution, ToolOutput},
};
use crate::{
    config::{PlannerConfig, DEFAULT_TIMEOUT_SECS},
    error::{PlannerError, Result},
    render::{ChartRenderer, SvgChartRenderer},
    services::planning::planning_instruction,
    tools::{tool_definitions, ToolCommand, ToolKind},
    types::{PlanResult, TripRequest},
};
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Where the pipeline goes once the tool calls have run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Synthesize,
    End,
}

fn route_after_tools(had_tool_calls: bool, state: &PlanState) -> Route {
    if had_tool_calls || state.report.is_none() {
        Route::Synthesize
    } else {
        Route::End
    }
}

/// Plans trips: asks the oracle once, runs the chosen tools, then writes the report.
#[derive(Debug)]
pub struct TravelPlannerAgent {
    oracle: Box<dyn DecisionOracle>,
    renderer: Box<dyn ChartRenderer>,
    timeout: Duration,
}

impl TravelPlannerAgent {
    pub fn new(oracle: impl DecisionOracle + 'static) -> Self {
        Self {
            oracle: Box::new(oracle),
            renderer: Box::new(SvgChartRenderer::new()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Agent driven by the deterministic scripted oracle; needs no network access
    pub fn offline() -> Self {
        Self::new(ScriptedOracle::new())
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let oracle = OpenAIOracle::from_config(config)?;
        Ok(Self::new(oracle).with_timeout(config.timeout))
    }

    pub fn from_env() -> Result<Self> {
        let config = PlannerConfig::from_env()?;
        Self::from_config(&config)
    }

    pub fn with_renderer(mut self, renderer: impl ChartRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Plan a complete trip.
    ///
    /// Invalid requests and oracle failures are returned as errors. A failing
    /// tool call does not stop the run; its error shows up in the report.
    pub async fn plan_trip(&self, request: &TripRequest) -> Result<PlanResult> {
        request.validate()?;

        let start_time = Instant::now();
        let mut memory = PlanMemory::new();
        let mut state = PlanState::new();

        info!(
            target: "tripplanner::agent",
            destination = %request.destination,
            days = request.duration,
            "starting travel planning"
        );
        memory.add_step(PlanStep::Task {
            content: describe_request(request),
        });

        let instruction = planning_instruction(request);
        let tools = tool_definitions();
        state = state.with_status(PlanStatus::PlanningStarted);

        let decision = timeout(
            self.timeout,
            self.oracle.decide(request, &instruction, &tools),
        )
        .await
        .map_err(|_| {
            PlannerError::Timeout(format!(
                "decision oracle did not answer within {:?}",
                self.timeout
            ))
        })
        .and_then(|decided| decided)
        .map_err(|err| {
            error!(target: "tripplanner::agent", code = err.error_code(), "planning failed: {}", err);
            err
        })?;

        memory.add_step(PlanStep::Planning {
            instruction,
            reply: decision.content.clone(),
        });

        let had_tool_calls = !decision.tool_calls.is_empty();
        let mut tool_outputs = Vec::with_capacity(decision.tool_calls.len());

        for call in decision.tool_calls {
            let (next, output) = self.run_tool(&mut memory, state, call);
            state = next;
            tool_outputs.push(output);
        }

        state = state.with_status(if had_tool_calls {
            PlanStatus::ToolsExecuted
        } else {
            PlanStatus::NoToolsCalled
        });

        if route_after_tools(had_tool_calls, &state) == Route::Synthesize {
            info!(target: "tripplanner::agent", "synthesizing travel report");
            let report = synthesize(request, &state);
            memory.add_step(PlanStep::Synthesis {
                report: report.clone(),
            });
            state = state.with_report(report);
        }
        state = state.with_status(PlanStatus::Completed);

        info!(
            target: "tripplanner::agent",
            tool_calls = tool_outputs.len(),
            failures = state.failures.len(),
            "travel planning completed"
        );

        Ok(PlanResult::new(
            state.report.clone().unwrap_or_default(),
            state,
            memory.into_steps(),
            tool_outputs,
            decision.usage,
            start_time.elapsed(),
        ))
    }

    /// Execute one call against the snapshot; failures become part of the next snapshot.
    fn run_tool(
        &self,
        memory: &mut PlanMemory,
        state: PlanState,
        call: ToolCall,
    ) -> (PlanState, ToolOutput) {
        memory.add_step(PlanStep::Action {
            tool_name: call.name.clone(),
            tool_call_id: call.id.clone(),
            arguments: call.arguments.clone(),
        });

        let execution = ToolExecution::start(call);
        let outcome = ToolCommand::parse(&execution.tool_call)
            .and_then(|command| command.execute(&state, self.renderer.as_ref()));

        let (next, output) = match outcome {
            Ok(delta) => {
                let output = execution.complete(delta.to_observation());
                (state.apply(delta), output)
            }
            Err(err) => {
                warn!(
                    target: "tripplanner::tools",
                    tool = %execution.tool_call.name,
                    call_id = %execution.tool_call.id,
                    code = err.error_code(),
                    "tool call failed: {}",
                    err
                );
                let failure = ToolFailure {
                    tool: ToolKind::from_name(&execution.tool_call.name),
                    tool_name: execution.tool_call.name.clone(),
                    tool_call_id: execution.tool_call.id.clone(),
                    error_code: err.error_code().to_string(),
                    message: err.to_string(),
                };
                (state.with_failure(failure), execution.complete_with_error(&err))
            }
        };

        memory.add_step(PlanStep::Observation {
            tool_call_id: output.tool_call_id.clone(),
            result: output.as_string(),
            is_error: output.is_error,
        });
        (next, output)
    }
}

fn describe_request(request: &TripRequest) -> String {
    format!(
        "Plan a {}-day {} trip to {} for {} traveler(s), budget ${}, interests: {}, month: {}",
        request.duration,
        request.travel_style,
        request.destination,
        request.traveler_count,
        request.budget,
        request.interests.join(", "),
        request.travel_month
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_after_tools() {
        let fresh = PlanState::new();
        let reported = fresh.with_report("# done".to_string());

        assert_eq!(route_after_tools(true, &fresh), Route::Synthesize);
        assert_eq!(route_after_tools(true, &reported), Route::Synthesize);
        assert_eq!(route_after_tools(false, &fresh), Route::Synthesize);
        assert_eq!(route_after_tools(false, &reported), Route::End);
    }

    #[tokio::test]
    async fn test_offline_plan_for_paris() {
        let request = TripRequest::new("Paris", 3, 1500.0)
            .with_travel_style(crate::types::TravelStyle::Cultural)
            .with_traveler_count(2);
        let result = TravelPlannerAgent::offline().plan_trip(&request).await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.tool_outputs.len(), 6);
        assert!(result.errors().is_empty());
        assert!(result.itinerary_map().is_some());
        assert!(result.budget_chart().is_some());
        assert!(result.report.starts_with("# 🌍 PARIS TRAVEL PLAN"));
    }

    #[tokio::test]
    async fn test_invalid_request_fails_fast() {
        let request = TripRequest::new("Paris", 0, 1500.0);
        let err = TravelPlannerAgent::offline()
            .plan_trip(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_config_without_key_is_config_error() {
        let err = TravelPlannerAgent::from_config(&PlannerConfig::default()).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));
    }
}
