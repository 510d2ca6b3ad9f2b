use std::env;
use std::str::FromStr;

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::errors::ConfigError;

/// The one environment variable without a default.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_AGENT_NAME: &str = "Roost Agent";

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TOP_P: f32 = 0.95;
const DEFAULT_TOP_K: u32 = 40;
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Read access to the process environment, injectable so tests never touch
/// (or race on) real process state.
#[cfg_attr(test, automock)]
pub trait Environment: Send + Sync {
    fn get_var(&self, key: &str) -> Result<String, env::VarError>;
}

pub struct RealEnvironment;

impl Environment for RealEnvironment {
    fn get_var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

/// Sampling parameters for the model. Immutable after construction; the range
/// checks run in `new`, so a held value is always in bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl ModelConfig {
    pub fn new(
        name: impl Into<String>,
        temperature: f32,
        top_p: f32,
        top_k: u32,
        max_output_tokens: u32,
    ) -> Result<Self, ConfigError> {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::OutOfRange {
                field: "temperature",
                value: temperature.to_string(),
                bound: "0.0..=2.0",
            });
        }
        if !(0.0..=1.0).contains(&top_p) {
            return Err(ConfigError::OutOfRange {
                field: "top_p",
                value: top_p.to_string(),
                bound: "0.0..=1.0",
            });
        }
        if top_k < 1 {
            return Err(ConfigError::OutOfRange {
                field: "top_k",
                value: top_k.to_string(),
                bound: ">= 1",
            });
        }
        if !(1..=8192).contains(&max_output_tokens) {
            return Err(ConfigError::OutOfRange {
                field: "max_output_tokens",
                value: max_output_tokens.to_string(),
                bound: "1..=8192",
            });
        }

        Ok(Self {
            name: name.into(),
            temperature,
            top_p,
            top_k,
            max_output_tokens,
        })
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Output format for the diagnostic sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    Json,
    Text,
}

/// Session-level settings: display name and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub debug: bool,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_AGENT_NAME.to_string(),
            debug: false,
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
        }
    }
}

/// Everything a session needs, loaded once per process. `api_key` is
/// guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: String,
    pub model: ModelConfig,
    pub agent: AgentConfig,
}

impl AppConfig {
    /// Load configuration from a `.env` file (if present) and the process
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::load(&RealEnvironment)
    }

    /// Load configuration from the given environment.
    pub fn load(environment: &impl Environment) -> Result<Self, ConfigError> {
        let api_key = match get_env(environment, API_KEY_VAR)? {
            Some(key) if !key.is_empty() => key,
            _ => return Err(ConfigError::MissingEnvVar { var: API_KEY_VAR }),
        };

        let model = ModelConfig::new(
            get_env(environment, "MODEL_NAME")?.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            parse_var(environment, "TEMPERATURE", DEFAULT_TEMPERATURE)?,
            parse_var(environment, "TOP_P", DEFAULT_TOP_P)?,
            parse_var(environment, "TOP_K", DEFAULT_TOP_K)?,
            parse_var(environment, "MAX_OUTPUT_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS)?,
        )?;

        let log_format = match get_env(environment, "LOG_FORMAT")? {
            Some(raw) => LogFormat::from_str(&raw).map_err(|_| ConfigError::InvalidValue {
                var: "LOG_FORMAT",
                value: raw,
            })?,
            None => LogFormat::Json,
        };

        let agent = AgentConfig {
            name: get_env(environment, "AGENT_NAME")?
                .unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string()),
            debug: get_env(environment, "DEBUG")?
                .map(|raw| raw.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            log_level: get_env(environment, "LOG_LEVEL")?.unwrap_or_else(|| "info".to_string()),
            log_format,
        };

        Ok(Self {
            api_key,
            model,
            agent,
        })
    }
}

fn get_env(
    environment: &impl Environment,
    key: &'static str,
) -> Result<Option<String>, ConfigError> {
    match environment.get_var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
            var: key,
            value: "<non-unicode>".to_string(),
        }),
    }
}

fn parse_var<T: FromStr>(
    environment: &impl Environment,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get_env(environment, key)? {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var: key, value: raw }),
        None => Ok(default),
    }
}
