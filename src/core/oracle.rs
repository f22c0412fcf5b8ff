use super::tool_call::ToolCall;
use crate::{
    config::PlannerConfig,
    error::{PlannerError, Result},
    services::{
        openai_client::{ChatCompletionRequest, OpenAIClient},
        planning::SYSTEM_PROMPT,
    },
    tools::ToolKind,
    types::{TokenUsage, TripRequest},
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// What the oracle decided to do for a request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OracleDecision {
    /// Tool invocations, in the order they should run
    pub tool_calls: Vec<ToolCall>,
    /// Free text the oracle replied with, if any
    pub content: Option<String>,
    pub usage: Option<TokenUsage>,
}

/// Chooses which tools to call for a trip request.
#[async_trait]
pub trait DecisionOracle: Send + Sync + std::fmt::Debug {
    async fn decide(
        &self,
        request: &TripRequest,
        instruction: &str,
        tools: &[Value],
    ) -> Result<OracleDecision>;
}

/// Decision oracle backed by an OpenAI-compatible chat-completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAIOracle {
    client: OpenAIClient,
    model: String,
    max_tokens: Option<u32>,
    temperature: f32,
    timeout: Duration,
}

impl OpenAIOracle {
    pub fn new(api_key: String) -> Self {
        let defaults = PlannerConfig::default();
        Self {
            client: OpenAIClient::new(api_key),
            model: defaults.model,
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
            timeout: defaults.timeout,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        config.validate()?;
        let api_key = config.require_api_key()?.to_string();

        Ok(Self::new(api_key)
            .with_base_url(config.base_url.clone())
            .with_model(config.model.clone())
            .with_max_tokens(config.max_tokens)
            .with_temperature(config.temperature)
            .with_timeout(config.timeout))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client.set_base_url(base_url);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl DecisionOracle for OpenAIOracle {
    async fn decide(
        &self,
        _request: &TripRequest,
        instruction: &str,
        tools: &[Value],
    ) -> Result<OracleDecision> {
        let messages = vec![
            json!({ "role": "system", "content": SYSTEM_PROMPT }),
            json!({ "role": "user", "content": instruction }),
        ];

        let mut chat_request = ChatCompletionRequest::new(self.model.clone(), messages)
            .with_max_tokens(self.max_tokens)
            .with_temperature(Some(self.temperature));
        if !tools.is_empty() {
            chat_request = chat_request
                .with_tools(tools.to_vec())
                .with_tool_choice(json!("auto"));
        }

        let response = self
            .client
            .chat_completion(&chat_request.into_value(), self.timeout)
            .await?;

        parse_decision(&response)
    }
}

fn parse_decision(response: &Value) -> Result<OracleDecision> {
    let choices = response
        .get("choices")
        .and_then(|value| value.as_array())
        .ok_or_else(|| {
            PlannerError::Oracle("Missing 'choices' array in completion response".to_string())
        })?;

    let first_choice = choices.first().ok_or_else(|| {
        PlannerError::Oracle("Completion response contained no choices".to_string())
    })?;

    let message = first_choice.get("message").ok_or_else(|| {
        PlannerError::Oracle("Completion response missing assistant message".to_string())
    })?;

    let tool_calls = message
        .get("tool_calls")
        .and_then(|value| value.as_array())
        .map(|calls| {
            calls
                .iter()
                .filter_map(|raw| {
                    let parsed = ToolCall::from_openai_format(raw);
                    if parsed.is_none() {
                        warn!(
                            target: "tripplanner::oracle",
                            call = %raw,
                            "dropping tool call without id or function name"
                        );
                    }
                    parsed
                })
                .collect()
        })
        .unwrap_or_default();

    let content = message
        .get("content")
        .and_then(|value| value.as_str())
        .filter(|text| !text.trim().is_empty())
        .map(|text| text.to_string());

    let decision = OracleDecision {
        tool_calls,
        content,
        usage: TokenUsage::from_response(response),
    };
    debug!(
        target: "tripplanner::oracle",
        tool_calls = decision.tool_calls.len(),
        "oracle decision parsed"
    );
    Ok(decision)
}

/// Deterministic oracle for offline runs and tests.
///
/// By default it calls every tool once, in dependency order, with arguments
/// taken from the request. A fixed list of calls can be supplied instead.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOracle {
    calls: Option<Vec<ToolCall>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calls(calls: Vec<ToolCall>) -> Self {
        Self { calls: Some(calls) }
    }

    /// The full tool plan for a request
    pub fn full_plan(request: &TripRequest) -> Vec<ToolCall> {
        let plan = [
            (
                ToolKind::ResearchDestination,
                json!({
                    "destination": request.destination,
                    "interests": request.interests,
                }),
            ),
            (
                ToolKind::GetSeasonalWeather,
                json!({
                    "destination": request.destination,
                    "travel_month": request.travel_month,
                }),
            ),
            (
                ToolKind::CalculateBudgetBreakdown,
                json!({
                    "destination": request.destination,
                    "duration": request.duration,
                    "total_budget": request.budget,
                    "travel_style": request.travel_style,
                    "traveler_count": request.traveler_count,
                }),
            ),
            (
                ToolKind::BuildDailyItinerary,
                json!({
                    "destination": request.destination,
                    "duration": request.duration,
                    "travel_style": request.travel_style,
                }),
            ),
            (
                ToolKind::GenerateItineraryMap,
                json!({ "destination": request.destination }),
            ),
            (ToolKind::GenerateBudgetChart, json!({})),
        ];

        plan.into_iter()
            .enumerate()
            .map(|(idx, (kind, arguments))| {
                ToolCall::new(format!("call_{}", idx + 1), kind.name().to_string(), arguments)
            })
            .collect()
    }
}

#[async_trait]
impl DecisionOracle for ScriptedOracle {
    async fn decide(
        &self,
        request: &TripRequest,
        _instruction: &str,
        _tools: &[Value],
    ) -> Result<OracleDecision> {
        let tool_calls = match &self.calls {
            Some(calls) => calls.clone(),
            None => Self::full_plan(request),
        };

        Ok(OracleDecision {
            tool_calls,
            content: None,
            usage: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_plan_calls_every_tool_in_order() {
        let request = TripRequest::new("Paris", 3, 1500.0);
        let plan = ScriptedOracle::full_plan(&request);

        let names: Vec<&str> = plan.iter().map(|call| call.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "research_destination",
                "get_seasonal_weather",
                "calculate_budget_breakdown",
                "build_daily_itinerary",
                "generate_itinerary_map",
                "generate_budget_chart",
            ]
        );
        assert_eq!(plan[2].arguments["total_budget"], 1500.0);
        assert_eq!(plan[2].arguments["travel_style"], "mixed");
        assert_eq!(plan[0].id, "call_1");
    }

    #[test]
    fn test_scripted_oracle_returns_fixed_calls() {
        let calls = vec![ToolCall::new(
            "call_x".to_string(),
            "get_seasonal_weather".to_string(),
            json!({ "destination": "Bali" }),
        )];
        let oracle = ScriptedOracle::with_calls(calls.clone());
        let request = TripRequest::new("Bali", 2, 800.0);

        let decision = tokio_test::block_on(oracle.decide(&request, "", &[])).unwrap();
        assert_eq!(decision.tool_calls, calls);
    }

    #[test]
    fn test_parse_decision_reads_calls_content_and_usage() {
        let response = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Let me plan that.",
                    "tool_calls": [
                        {
                            "id": "call_a",
                            "type": "function",
                            "function": { "name": "research_destination", "arguments": "{\"destination\":\"Paris\"}" }
                        },
                        { "type": "function", "function": { "name": "no_id" } }
                    ]
                }
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        });

        let decision = parse_decision(&response).unwrap();
        assert_eq!(decision.tool_calls.len(), 1);
        assert_eq!(decision.content.as_deref(), Some("Let me plan that."));
        assert_eq!(decision.usage.map(|u| u.total_tokens), Some(15));
    }

    #[test]
    fn test_parse_decision_without_choices_fails() {
        assert!(matches!(
            parse_decision(&json!({ "choices": [] })),
            Err(PlannerError::Oracle(_))
        ));
        assert!(matches!(
            parse_decision(&json!({})),
            Err(PlannerError::Oracle(_))
        ));
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let err = OpenAIOracle::from_config(&PlannerConfig::default()).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));

        let oracle =
            OpenAIOracle::from_config(&PlannerConfig::default().with_api_key("sk-test").with_model("m"))
                .unwrap();
        assert_eq!(oracle.model(), "m");
    }
}
