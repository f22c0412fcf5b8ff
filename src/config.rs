use crate::{
    error::{PlannerError, Result},
    services::openai_client::DEFAULT_BASE_URL,
};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "openai/gpt-4.1-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Settings for the remote decision oracle
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub max_tokens: Option<u32>,
    pub temperature: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl PlannerConfig {
    /// Read settings from the process environment (call `dotenvy::dotenv()` first to pick up `.env`).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        config.api_key = get("OPENAI_API_KEY");
        if let Some(base_url) = get("OPENAI_BASE_URL").or_else(|| get("OPENROUTER_BASE_URL")) {
            config.base_url = base_url;
        }
        if let Some(model) = get("MODEL") {
            config.model = model;
        }
        if let Some(raw) = get("PLANNER_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                PlannerError::Config(format!(
                    "PLANNER_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(PlannerError::Config(
                "oracle timeout must be greater than zero".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(PlannerError::Config("model must not be empty".to_string()));
        }
        Ok(())
    }

    /// API key, or a `Config` error explaining how to provide one
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            PlannerError::Config(
                "OPENAI_API_KEY environment variable must be set (or pass --api-key / use --offline)"
                    .to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = PlannerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.model, "openai/gpt-4.1-mini");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_environment_overrides() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENROUTER_BASE_URL", "http://router.local/v1"),
            ("MODEL", "anthropic/claude-3-haiku"),
            ("PLANNER_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.require_api_key().unwrap(), "sk-test");
        assert_eq!(config.base_url, "http://router.local/v1");
        assert_eq!(config.model, "anthropic/claude-3-haiku");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_openai_base_url_wins_over_openrouter() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("OPENAI_BASE_URL", "http://openai.local/v1"),
            ("OPENROUTER_BASE_URL", "http://router.local/v1"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://openai.local/v1");
    }

    #[test]
    fn test_bad_timeout_is_a_config_error() {
        let err = PlannerConfig::from_lookup(lookup(&[("PLANNER_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));

        let err = PlannerConfig::from_lookup(lookup(&[("PLANNER_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));
    }
}
