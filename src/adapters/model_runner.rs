//! Backend registry implementing the `run(modelType, messages)` contract.

use std::collections::HashMap;
use std::sync::Arc;

use crate::adapters::gemini_http::HttpGeminiBackend;
use crate::domain::{AppError, ChatMessage, GeminiApiConfig, ModelType};
use crate::ports::ModelBackend;

/// Environment variable holding the Gemini API key.
pub const GOOGLE_GEN_API_KEY: &str = "GOOGLE_GEN_API_KEY";

/// Uniform adapter over the configured text-generation backends.
///
/// `run` selects a backend by model type and fails closed before any
/// network attempt when the type has no registered backend. It performs no
/// retries; callers may retry the whole pipeline.
#[derive(Default)]
pub struct ModelRunner {
    backends: HashMap<ModelType, Arc<dyn ModelBackend>>,
}

impl ModelRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend for a model type, replacing any existing one.
    pub fn with_backend(mut self, model: ModelType, backend: Arc<dyn ModelBackend>) -> Self {
        self.backends.insert(model, backend);
        self
    }

    /// Wire HTTP Gemini backends for every known model type, reading the
    /// API key from `GOOGLE_GEN_API_KEY`.
    pub fn gemini_from_env(config: &GeminiApiConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(GOOGLE_GEN_API_KEY)
            .map_err(|_| AppError::EnvironmentVariableMissing(GOOGLE_GEN_API_KEY.into()))?;

        let mut runner = Self::new();
        for model in [ModelType::GeminiPro, ModelType::GeminiFlash] {
            let backend = HttpGeminiBackend::new(api_key.clone(), config, model)?;
            runner = runner.with_backend(model, Arc::new(backend));
        }
        Ok(runner)
    }

    pub fn supports(&self, model: ModelType) -> bool {
        self.backends.contains_key(&model)
    }

    /// Execute an ordered conversation against the selected backend and
    /// return its single textual completion.
    pub async fn run(
        &self,
        model: ModelType,
        messages: &[ChatMessage],
    ) -> Result<String, AppError> {
        if messages.is_empty() {
            return Err(AppError::EmptyMessageSequence);
        }

        let backend = self
            .backends
            .get(&model)
            .ok_or_else(|| AppError::UnsupportedBackend(model.to_string()))?;

        backend.run(messages).await
    }
}

impl std::fmt::Debug for ModelRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRunner")
            .field("backends", &self.backends.keys().collect::<Vec<_>>())
            .finish()
    }
}
