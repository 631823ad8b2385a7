//! Persisted entities consumed and produced by the generation pipeline.
//!
//! Storage mechanics live behind the [`RecordStore`](crate::ports::RecordStore)
//! port; these are the shapes that cross it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AppError, GeneratedSystemPrompt, RecordId};

/// A course a generated assignment may be attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    /// Free-text generation prompt authored for the course.
    pub generation_prompt: String,
    #[serde(default)]
    pub subject_id: Option<RecordId>,
    #[serde(default)]
    pub grade_id: Option<RecordId>,
    /// Stored system prompt used as template context, not generated here.
    pub system_prompt: String,
}

/// Category-specific generation instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentSubCategory {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub system_prompt: String,
}

/// An assignment category holding an ordered list of sub-category refs.
///
/// An empty `sub_category_ids` list is valid and yields a minimal composite
/// prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentCategory {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub sub_category_ids: Vec<RecordId>,
}

/// A category fetched with its sub-categories expanded inline, preserving
/// stored order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWithSubCategories {
    pub category: AssignmentCategory,
    pub sub_categories: Vec<AssignmentSubCategory>,
}

/// Raw assignment fields supplied by the caller of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentInput {
    pub title: String,
    pub description: Option<String>,
    pub learning_objectives: Option<String>,
    pub course_id: Option<RecordId>,
    pub assignment_category_id: RecordId,
}

impl AssignmentInput {
    /// Structural validation, run before any record is fetched.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::InvalidInput("title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Transient union of assignment input and its resolved context.
///
/// Constructed fresh per invocation by the orchestrator and discarded after
/// composition.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub input: AssignmentInput,
    pub course: Option<Course>,
    pub category: CategoryWithSubCategories,
}

/// The assignment record the caller persists after generation succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: RecordId,
    pub title: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub learning_objectives: Option<String>,
    #[serde(default)]
    pub course_id: Option<RecordId>,
    pub assignment_category_id: RecordId,
    /// Serialized `{instructions, rubric}` payload.
    pub system_prompt: String,
}

impl Assignment {
    /// Build the record to persist from validated input and a validated
    /// generation result.
    ///
    /// Taking `GeneratedSystemPrompt` by reference keeps "never persist a
    /// malformed payload" structural: the only way to obtain one is through
    /// its validating parser or field-checked construction.
    pub fn from_generated(
        id: RecordId,
        input: AssignmentInput,
        due_date: DateTime<Utc>,
        prompt: &GeneratedSystemPrompt,
    ) -> Self {
        Self {
            id,
            title: input.title,
            due_date,
            description: input.description,
            learning_objectives: input.learning_objectives,
            course_id: input.course_id,
            assignment_category_id: input.assignment_category_id,
            system_prompt: prompt.to_stored_payload(),
        }
    }
}
