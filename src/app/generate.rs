//! Assignment system-prompt generation orchestrator.
//!
//! Linear pipeline: resolve referenced records, compose the request, run
//! the selected backend, validate the reply. Any failure aborts the
//! pipeline with a typed error; nothing is persisted here.

use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::adapters::ModelRunner;
use crate::domain::generated_prompt::truncate_raw;
use crate::domain::prompt::compose;
use crate::domain::{
    AppError, AssignmentInput, Course, GeneratedSystemPrompt, GenerationConfig,
    GenerationRequest,
};
use crate::ports::RecordStore;

/// Orchestrates one generation call per invocation.
///
/// Concurrent generations are independent: they share only the read-only
/// record store and stateless backends.
pub struct PromptGenerator<S> {
    store: S,
    runner: ModelRunner,
    config: GenerationConfig,
}

impl<S: RecordStore> PromptGenerator<S> {
    pub fn new(store: S, runner: ModelRunner, config: GenerationConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self { store, runner, config })
    }

    /// Run the full pipeline and return the validated artifact.
    ///
    /// The caller persists the result; it must never persist anything when
    /// this returns an error.
    pub async fn generate(
        &self,
        input: &AssignmentInput,
    ) -> Result<GeneratedSystemPrompt, AppError> {
        self.generate_cancellable(input, &CancellationToken::new()).await
    }

    /// Like [`generate`], racing the generate step against a caller-held
    /// cancellation token.
    ///
    /// [`generate`]: PromptGenerator::generate
    pub async fn generate_cancellable(
        &self,
        input: &AssignmentInput,
        cancel: &CancellationToken,
    ) -> Result<GeneratedSystemPrompt, AppError> {
        let request = self.resolve(input).await?;
        let messages = compose(&request)?;

        let timeout = Duration::from_secs(self.config.timeout_secs);
        let reply = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("generation cancelled before completion");
                return Err(AppError::Cancelled);
            }
            outcome = time::timeout(timeout, self.runner.run(self.config.model, &messages)) => {
                match outcome {
                    Ok(result) => result?,
                    Err(_) => {
                        return Err(AppError::Timeout {
                            timeout_secs: self.config.timeout_secs,
                        });
                    }
                }
            }
        };

        let prompt = GeneratedSystemPrompt::parse(&reply).inspect_err(|_| {
            warn!(raw = %truncate_raw(&reply), "backend reply failed validation");
        })?;

        info!(model = %self.config.model, "assignment system prompt generated");
        Ok(prompt)
    }

    /// Resolve and compose only, returning the composed content.
    ///
    /// This is the dry-run surface: it never touches a backend.
    pub async fn preview(&self, input: &AssignmentInput) -> Result<String, AppError> {
        let request = self.resolve(input).await?;
        let messages = compose(&request)?;
        messages
            .into_iter()
            .next()
            .map(|message| message.content)
            .ok_or_else(|| AppError::PromptComposition("composer returned no messages".to_string()))
    }

    async fn resolve(&self, input: &AssignmentInput) -> Result<GenerationRequest, AppError> {
        input.validate()?;

        // Category is mandatory: fail before any backend call.
        let category = self
            .store
            .find_category_with_sub_categories(&input.assignment_category_id)
            .await?
            .ok_or_else(|| {
                AppError::CategoryNotFound(input.assignment_category_id.to_string())
            })?;

        let course = self.resolve_course(input).await?;

        Ok(GenerationRequest { input: input.clone(), course, category })
    }

    /// Course context is optional enrichment: an unresolvable reference
    /// degrades to "no course context" instead of failing.
    async fn resolve_course(&self, input: &AssignmentInput) -> Result<Option<Course>, AppError> {
        let Some(course_id) = &input.course_id else {
            return Ok(None);
        };

        let course = self.store.find_course_by_id(course_id).await?;
        if course.is_none() {
            debug!(course_id = %course_id, "course not found, composing without course context");
        }
        Ok(course)
    }
}
