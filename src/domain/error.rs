use std::io;

use thiserror::Error;

/// Library-wide error type for generation pipeline operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Required environment variable is not set.
    #[error("Environment variable {0} is not set")]
    EnvironmentVariableMissing(String),

    /// Record identifier is invalid.
    #[error("Invalid record id '{0}': must be alphanumeric with hyphens or underscores")]
    InvalidRecordId(String),

    /// Assignment input failed structural validation.
    #[error("Invalid assignment input: {0}")]
    InvalidInput(String),

    /// Assignment category reference does not resolve.
    #[error("Assignment category '{0}' not found")]
    CategoryNotFound(String),

    /// Model type is unknown or has no registered backend.
    #[error("Unsupported model type: {0}")]
    UnsupportedBackend(String),

    /// Empty message sequence handed to the model backend adapter.
    #[error("Message sequence must be non-empty")]
    EmptyMessageSequence,

    /// Network or provider error during generation.
    #[error("Model backend request failed: {message}")]
    BackendFailure { message: String, status: Option<u16> },

    /// The generate step exceeded its configured bound.
    #[error("Model backend did not answer within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The backend's reply could not be parsed or validated.
    ///
    /// `raw` carries the (truncated) reply for diagnosis. It must never be
    /// persisted as the artifact.
    #[error("Malformed generation response: {reason}")]
    MalformedResponse { reason: String, raw: String },

    /// Caller-initiated cancellation mid-pipeline.
    #[error("Generation cancelled")]
    Cancelled,

    /// Record store failure surfaced by an adapter.
    #[error("Record store error: {0}")]
    Store(String),

    /// Prompt composition failed to render.
    #[error("Prompt composition failed: {0}")]
    PromptComposition(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Whether a caller retrying the whole pipeline has a chance of success.
    ///
    /// The core itself never retries; this is a hint for the HTTP-facing
    /// layer's retry policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Timeout { .. } => true,
            AppError::BackendFailure { message, status } => {
                if status.is_some_and(|code| code == 408 || code == 429 || code >= 500) {
                    return true;
                }
                let lower = message.to_ascii_lowercase();
                lower.contains("timeout")
                    || lower.contains("timed out")
                    || lower.contains("connect")
                    || lower.contains("connection")
                    || lower.contains("temporary")
            }
            _ => false,
        }
    }
}
