//! eduforge: assignment system-prompt generation for educator backends.
//!
//! The pipeline gathers a hierarchy of records (course, assignment category,
//! sub-categories), composes a single structured generation request, runs it
//! against a configured text-generation backend, and validates the reply
//! into an `{instructions, rubric}` artifact the caller persists.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

pub use adapters::{HttpGeminiBackend, MemoryRecordStore, ModelRunner};
pub use app::PromptGenerator;
pub use domain::{
    AppError, Assignment, AssignmentCategory, AssignmentInput, AssignmentSubCategory,
    CategoryWithSubCategories, ChatMessage, Course, GeneratedSystemPrompt, GenerationConfig,
    GeminiApiConfig, ModelType, RecordId, Role, ServiceConfig,
};
pub use ports::{MockModelBackend, ModelBackend, RecordStore};

/// Generate the system prompt for an assignment using Gemini backends wired
/// from the environment.
///
/// This is the entry point the assignment-creation workflow uses; the caller
/// persists the returned artifact on the assignment record. Tests and
/// embedded callers that need stub backends construct a
/// [`PromptGenerator`] directly instead.
pub async fn generate_assignment_system_prompt<S: RecordStore>(
    store: S,
    config: &ServiceConfig,
    input: &AssignmentInput,
) -> Result<GeneratedSystemPrompt, AppError> {
    let runner = ModelRunner::gemini_from_env(&config.gemini)?;
    let generator = PromptGenerator::new(store, runner, config.generation)?;
    generator.generate(input).await
}
