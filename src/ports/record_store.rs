//! Record store port definition.
//!
//! Persistence mechanics are an external collaborator; the pipeline only
//! consumes these two read operations.

use async_trait::async_trait;

use crate::domain::{AppError, CategoryWithSubCategories, Course, RecordId};

/// Read interface over the durable record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch a course by id. Absence is not an error.
    async fn find_course_by_id(&self, id: &RecordId) -> Result<Option<Course>, AppError>;

    /// Fetch an assignment category with its sub-categories expanded inline,
    /// preserving stored order. Absence is not an error.
    async fn find_category_with_sub_categories(
        &self,
        id: &RecordId,
    ) -> Result<Option<CategoryWithSubCategories>, AppError>;
}
