//! Generation pipeline configuration.
//!
//! The orchestrator receives its backend identifier and timeout as explicit
//! configuration, never as a module-level constant, so tests can substitute
//! stub backends.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Identifier for a configured text-generation backend.
///
/// Unknown identifiers fail closed at the parsing edge, before any record
/// fetch or network attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelType {
    GeminiPro,
    GeminiFlash,
}

impl ModelType {
    /// Provider-side model identifier used in request URLs.
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelType::GeminiPro => "gemini-pro",
            ModelType::GeminiFlash => "gemini-2.0-flash",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::GeminiPro => "gemini-pro",
            ModelType::GeminiFlash => "gemini-flash",
        }
    }
}

impl FromStr for ModelType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "gemini-pro" => Ok(ModelType::GeminiPro),
            "gemini-flash" => Ok(ModelType::GeminiFlash),
            other => Err(AppError::UnsupportedBackend(other.to_string())),
        }
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Service configuration loaded from `eduforge.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Orchestrator configuration.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Gemini API configuration.
    #[serde(default)]
    pub gemini: GeminiApiConfig,
}

impl ServiceConfig {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.generation.validate()?;
        self.gemini.validate()?;
        Ok(())
    }
}

/// Orchestrator configuration: selected backend and generate-step bound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Backend used for the generate step.
    #[serde(default = "default_model")]
    pub model: ModelType,
    /// Bound on the generate step in seconds.
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { model: default_model(), timeout_secs: default_generation_timeout() }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("generation.timeout_secs must be greater than 0"));
        }
        Ok(())
    }
}

/// Gemini API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiApiConfig {
    /// Gemini API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeminiApiConfig {
    fn default() -> Self {
        Self { api_url: default_api_url(), timeout_secs: default_request_timeout() }
    }
}

impl GeminiApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("gemini.timeout_secs must be greater than 0"));
        }
        Ok(())
    }
}

fn default_model() -> ModelType {
    ModelType::GeminiFlash
}

fn default_generation_timeout() -> u64 {
    60
}

fn default_api_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta")
        .expect("Default API URL must be valid")
}

fn default_request_timeout() -> u64 {
    30
}
