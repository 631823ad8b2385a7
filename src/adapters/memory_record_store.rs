//! In-memory record store for tests and fixture-driven runs.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{
    AppError, AssignmentCategory, AssignmentSubCategory, CategoryWithSubCategories, Course,
    RecordId,
};
use crate::ports::RecordStore;

/// In-memory record store.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    // Arc<Mutex> to allow cloning and shared state across concurrent reads.
    inner: Arc<Mutex<Records>>,
}

#[derive(Debug, Default)]
struct Records {
    courses: HashMap<RecordId, Course>,
    categories: HashMap<RecordId, AssignmentCategory>,
    sub_categories: HashMap<RecordId, AssignmentSubCategory>,
}

/// Fixture file shape: `[[courses]]`, `[[categories]]`, `[[sub_categories]]`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordFixture {
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    categories: Vec<AssignmentCategory>,
    #[serde(default)]
    sub_categories: Vec<AssignmentSubCategory>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records from a TOML fixture file.
    pub fn from_fixture_path(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_fixture_str(&raw)
    }

    /// Load records from TOML fixture text.
    pub fn from_fixture_str(raw: &str) -> Result<Self, AppError> {
        let fixture: RecordFixture = toml::from_str(raw)?;
        let store = Self::new();
        for course in fixture.courses {
            store.insert_course(course);
        }
        for category in fixture.categories {
            store.insert_category(category);
        }
        for sub_category in fixture.sub_categories {
            store.insert_sub_category(sub_category);
        }
        Ok(store)
    }

    pub fn insert_course(&self, course: Course) {
        self.inner.lock().unwrap().courses.insert(course.id.clone(), course);
    }

    pub fn insert_category(&self, category: AssignmentCategory) {
        self.inner.lock().unwrap().categories.insert(category.id.clone(), category);
    }

    pub fn insert_sub_category(&self, sub_category: AssignmentSubCategory) {
        self.inner
            .lock()
            .unwrap()
            .sub_categories
            .insert(sub_category.id.clone(), sub_category);
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_course_by_id(&self, id: &RecordId) -> Result<Option<Course>, AppError> {
        Ok(self.inner.lock().unwrap().courses.get(id).cloned())
    }

    async fn find_category_with_sub_categories(
        &self,
        id: &RecordId,
    ) -> Result<Option<CategoryWithSubCategories>, AppError> {
        let records = self.inner.lock().unwrap();
        let Some(category) = records.categories.get(id).cloned() else {
            return Ok(None);
        };

        // Unresolvable sub-category refs are dropped, matching populate
        // semantics; order follows the stored id list.
        let sub_categories = category
            .sub_category_ids
            .iter()
            .filter_map(|sub_id| records.sub_categories.get(sub_id).cloned())
            .collect();

        Ok(Some(CategoryWithSubCategories { category, sub_categories }))
    }
}
