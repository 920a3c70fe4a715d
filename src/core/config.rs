//! Configuration loaded once at startup and passed explicitly to each component.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_openai::config::OpenAIConfig;

use crate::core::credentials::{self, Provider};
use crate::core::itinerary::NamePolicy;
use crate::core::paths;

const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_REVIEWS_BASE_URL: &str = "https://api.content.tripadvisor.com/api/v1";
const DEFAULT_REVIEW_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REVIEW_CONCURRENCY: usize = 4;

/// LLM endpoint and model used for itinerary generation.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub openai_config: OpenAIConfig,
    pub model_id: String,
    pub temperature: f32,
}

/// Review provider settings. No key means lookups are skipped entirely.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub concurrency: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when no OpenRouter key is available; see [`Config::llm`].
    pub llm: Option<LlmConfig>,
    pub reviews: ReviewConfig,
    pub store_path: PathBuf,
    pub name_policy: NamePolicy,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENROUTER_API_KEY is not set (export it, add it to .env, or run `config set-key openrouter`)")]
    MissingApiKey,
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    /// LLM settings, or [`ConfigError::MissingApiKey`] when none are configured.
    pub fn llm(&self) -> Result<&LlmConfig, ConfigError> {
        self.llm.as_ref().ok_or(ConfigError::MissingApiKey)
    }

    /// Model ID for display ("—" when the LLM is not configured).
    pub fn model_label(&self) -> &str {
        self.llm.as_ref().map_or("—", |l| l.model_id.as_str())
    }
}

/// Environment lookup; blank values count as unset.
type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn var(lookup: EnvLookup<'_>, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(lookup: EnvLookup<'_>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(lookup, name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

/// Load configuration from the process environment and stored credentials.
pub fn load() -> Result<Config, ConfigError> {
    load_from(&|name| env::var(name).ok(), &credentials::load_stored_key)
}

/// Load configuration from explicit sources (environment lookup, stored-key lookup).
pub fn load_from(
    lookup: EnvLookup<'_>,
    stored_key: &dyn Fn(Provider) -> Option<String>,
) -> Result<Config, ConfigError> {
    let key_for = |provider: Provider| var(lookup, provider.env_var()).or_else(|| stored_key(provider));

    let llm = key_for(Provider::Openrouter).map(|api_key| {
        let base_url =
            var(lookup, "OPENROUTER_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string());
        let model_id = var(lookup, "OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        LlmConfig {
            openai_config: OpenAIConfig::new()
                .with_api_base(base_url)
                .with_api_key(api_key),
            model_id,
            temperature: DEFAULT_TEMPERATURE,
        }
    });

    let timeout_secs = parse_var(lookup, "TRIPADVISOR_TIMEOUT_SECS", DEFAULT_REVIEW_TIMEOUT_SECS)?;
    let concurrency = parse_var(
        lookup,
        "PLATE_PLANNER_REVIEW_CONCURRENCY",
        DEFAULT_REVIEW_CONCURRENCY,
    )?;
    if concurrency == 0 {
        return Err(ConfigError::Invalid {
            var: "PLATE_PLANNER_REVIEW_CONCURRENCY",
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let reviews = ReviewConfig {
        api_key: key_for(Provider::Tripadvisor),
        base_url: var(lookup, "TRIPADVISOR_BASE_URL")
            .unwrap_or_else(|| DEFAULT_REVIEWS_BASE_URL.to_string()),
        timeout: Duration::from_secs(timeout_secs),
        concurrency,
    };

    let store_path = var(lookup, "PLATE_PLANNER_STORE")
        .map(PathBuf::from)
        .unwrap_or_else(paths::default_store_path);
    let name_policy = parse_var(lookup, "PLATE_PLANNER_NAME_POLICY", NamePolicy::default())?;

    Ok(Config {
        llm,
        reviews,
        store_path,
        name_policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_from(&|name| map.get(name).cloned(), &|_| None)
    }

    #[test]
    fn defaults_without_keys() {
        let config = load_with(&[]).unwrap();
        assert!(config.llm.is_none());
        assert!(matches!(config.llm(), Err(ConfigError::MissingApiKey)));
        assert!(config.reviews.api_key.is_none());
        assert_eq!(config.reviews.timeout, Duration::from_secs(10));
        assert_eq!(config.reviews.concurrency, 4);
        assert_eq!(config.name_policy, NamePolicy::LengthGated);
        assert_eq!(config.model_label(), "—");
    }

    #[test]
    fn keys_and_overrides_from_env() {
        let config = load_with(&[
            ("OPENROUTER_API_KEY", "sk-or"),
            ("OPENROUTER_MODEL", "openai/gpt-4o-mini"),
            ("TRIP_ADVISOR_API_KEY", "ta"),
            ("TRIPADVISOR_TIMEOUT_SECS", "3"),
            ("PLATE_PLANNER_STORE", "/tmp/trip.json"),
            ("PLATE_PLANNER_NAME_POLICY", "meal-labeled"),
        ])
        .unwrap();
        assert_eq!(config.llm().unwrap().model_id, "openai/gpt-4o-mini");
        assert_eq!(config.reviews.api_key.as_deref(), Some("ta"));
        assert_eq!(config.reviews.timeout, Duration::from_secs(3));
        assert_eq!(config.store_path, PathBuf::from("/tmp/trip.json"));
        assert_eq!(config.name_policy, NamePolicy::MealLabeled);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = load_with(&[("OPENROUTER_API_KEY", "   ")]).unwrap();
        assert!(config.llm.is_none());
    }

    #[test]
    fn stored_key_is_the_fallback() {
        let config = load_from(&|_| None, &|p| {
            (p == Provider::Tripadvisor).then(|| "stored".to_string())
        })
        .unwrap();
        assert_eq!(config.reviews.api_key.as_deref(), Some("stored"));
        assert!(config.llm.is_none());
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = load_with(&[("TRIPADVISOR_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("TRIPADVISOR_TIMEOUT_SECS"));
        let err = load_with(&[("PLATE_PLANNER_NAME_POLICY", "fuzzy")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        let err = load_with(&[("PLATE_PLANNER_REVIEW_CONCURRENCY", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
