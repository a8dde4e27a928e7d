//! Process configuration from environment variables

use crate::counselor::{ChatContext, CounselorSettings};
use crate::llm::DEFAULT_BASE_URL;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GROQ_API_KEY is not set; the counselor cannot start without it")]
    MissingCredential,
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// Everything read at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub port: u16,
    /// Idle time after which a session is evicted
    pub session_ttl: Duration,
    pub counselor: CounselorSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingCredential)?;

        let defaults = CounselorSettings::default();

        let temperature: f32 = parse_var(&lookup, "COUNSELOR_TEMPERATURE", defaults.temperature)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                var: "COUNSELOR_TEMPERATURE",
                reason: format!("{temperature} is outside 0.0..=2.0"),
            });
        }

        let max_tokens: u32 = parse_var(&lookup, "COUNSELOR_MAX_TOKENS", defaults.max_tokens)?;
        if max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                var: "COUNSELOR_MAX_TOKENS",
                reason: "must be greater than zero".to_string(),
            });
        }

        let timeout_secs: u64 = parse_var(
            &lookup,
            "COUNSELOR_TIMEOUT_SECS",
            defaults.timeout.as_secs(),
        )?;

        let session_ttl_secs: u64 =
            parse_var(&lookup, "COUNSELOR_SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;
        if session_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "COUNSELOR_SESSION_TTL_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            api_key,
            model: lookup("COUNSELOR_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup("COUNSELOR_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            port: parse_var(&lookup, "COUNSELOR_PORT", DEFAULT_PORT)?,
            session_ttl: Duration::from_secs(session_ttl_secs),
            counselor: CounselorSettings {
                max_tokens,
                temperature,
                timeout: Duration::from_secs(timeout_secs.max(1)),
                chat_context: parse_var(&lookup, "COUNSELOR_CHAT_CONTEXT", ChatContext::Latest)?,
                validate_recommendations: parse_var(
                    &lookup,
                    "COUNSELOR_VALIDATE_RECOMMENDATIONS",
                    defaults.validate_recommendations,
                )?,
            },
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
