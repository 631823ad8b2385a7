//! End-to-end pipeline scenarios over the public API.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use eduforge::{
    AppError, Assignment, AssignmentCategory, AssignmentInput, AssignmentSubCategory,
    CategoryWithSubCategories, Course, GeneratedSystemPrompt, GenerationConfig,
    MemoryRecordStore, MockModelBackend, ModelRunner, ModelType, PromptGenerator, RecordId,
    RecordStore,
};

const WELL_FORMED_REPLY: &str = r#"{"instructions":"I","rubric":"R"}"#;

fn id(raw: &str) -> RecordId {
    RecordId::new(raw).unwrap()
}

fn sub_category(raw_id: &str, title: &str) -> AssignmentSubCategory {
    AssignmentSubCategory {
        id: id(raw_id),
        title: title.to_string(),
        description: Some(format!("{} rules", title)),
        system_prompt: format!("Honor the {} instructions.", title),
    }
}

fn seeded_store(sub_categories: Vec<AssignmentSubCategory>, with_course: bool) -> MemoryRecordStore {
    let store = MemoryRecordStore::new();
    store.insert_category(AssignmentCategory {
        id: id("cat-1"),
        title: "Essay".to_string(),
        subtitle: Some("Long-form writing".to_string()),
        sub_category_ids: sub_categories.iter().map(|s| s.id.clone()).collect(),
    });
    for sub in sub_categories {
        store.insert_sub_category(sub);
    }
    if with_course {
        store.insert_course(Course {
            id: id("course-1"),
            title: "World Geography".to_string(),
            description: "Physical geography fundamentals".to_string(),
            generation_prompt: "Focus on landforms".to_string(),
            subject_id: Some(id("subject-1")),
            grade_id: Some(id("grade-7")),
            system_prompt: "You teach geography.".to_string(),
        });
    }
    store
}

fn input(course: bool) -> AssignmentInput {
    AssignmentInput {
        title: "Essay on Rivers".to_string(),
        description: None,
        learning_objectives: None,
        course_id: course.then(|| id("course-1")),
        assignment_category_id: id("cat-1"),
    }
}

fn generator(
    store: MemoryRecordStore,
    reply: &str,
) -> PromptGenerator<MemoryRecordStore> {
    let runner = ModelRunner::new()
        .with_backend(ModelType::GeminiFlash, Arc::new(MockModelBackend::new(reply)));
    let config = GenerationConfig { model: ModelType::GeminiFlash, timeout_secs: 5 };
    PromptGenerator::new(store, runner, config).unwrap()
}

#[tokio::test]
async fn minimal_category_without_course_generates() {
    let generator = generator(seeded_store(vec![], false), WELL_FORMED_REPLY);

    let composed = generator.preview(&input(false)).await.unwrap();
    assert!(composed.contains(r#"- Title: "Essay on Rivers""#));
    assert!(composed.contains("No course context provided"));
    assert!(!composed.contains("Course Context:"));
    assert!(!composed.contains("Sub-Category:"));

    let prompt = generator.generate(&input(false)).await.unwrap();
    assert_eq!(prompt.instructions, "I");
    assert_eq!(prompt.rubric, "R");
}

#[tokio::test]
async fn course_block_precedes_ordered_sub_category_blocks() {
    let subs = vec![sub_category("sub-1", "Format"), sub_category("sub-2", "Grading")];
    let generator = generator(seeded_store(subs, true), WELL_FORMED_REPLY);

    let composed = generator.preview(&input(true)).await.unwrap();
    let course_at = composed.find("Course Context:").expect("course block present");
    let format_at = composed.find(r#"Sub-Category: "Format""#).expect("Format block present");
    let grading_at =
        composed.find(r#"Sub-Category: "Grading""#).expect("Grading block present");
    assert!(course_at < format_at);
    assert!(format_at < grading_at);

    let prompt = generator.generate(&input(true)).await.unwrap();
    assert_eq!(prompt.instructions, "I");
}

/// Record store wrapper counting category resolutions.
#[derive(Clone)]
struct CountingStore {
    inner: MemoryRecordStore,
    category_fetches: Arc<AtomicUsize>,
}

#[async_trait]
impl RecordStore for CountingStore {
    async fn find_course_by_id(&self, id: &RecordId) -> Result<Option<Course>, AppError> {
        self.inner.find_course_by_id(id).await
    }

    async fn find_category_with_sub_categories(
        &self,
        id: &RecordId,
    ) -> Result<Option<CategoryWithSubCategories>, AppError> {
        self.category_fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.find_category_with_sub_categories(id).await
    }
}

#[tokio::test]
async fn unregistered_backend_fails_after_resolve_and_never_generates() {
    let backend = MockModelBackend::new(WELL_FORMED_REPLY);
    let backend_calls = backend.call_counter();
    let category_fetches = Arc::new(AtomicUsize::new(0));
    let store = CountingStore {
        inner: seeded_store(vec![], false),
        category_fetches: category_fetches.clone(),
    };

    // The configured model has no registered backend.
    let runner = ModelRunner::new().with_backend(ModelType::GeminiPro, Arc::new(backend));
    let config = GenerationConfig { model: ModelType::GeminiFlash, timeout_secs: 5 };
    let generator = PromptGenerator::new(store, runner, config).unwrap();

    let err = generator.generate(&input(false)).await.unwrap_err();
    match err {
        AppError::UnsupportedBackend(name) => assert_eq!(name, "gemini-flash"),
        other => panic!("unexpected error variant: {}", other),
    }
    assert_eq!(category_fetches.load(Ordering::SeqCst), 1);
    assert_eq!(backend_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn generated_artifact_round_trips_through_assignment_record() {
    let generator = generator(seeded_store(vec![], false), WELL_FORMED_REPLY);
    let prompt = generator.generate(&input(false)).await.unwrap();

    let assignment = Assignment::from_generated(
        id("assignment-1"),
        input(false),
        Utc::now(),
        &prompt,
    );
    let restored = GeneratedSystemPrompt::from_stored_payload(&assignment.system_prompt).unwrap();
    assert_eq!(restored, prompt);
}

#[tokio::test]
async fn concurrent_generations_are_independent() {
    let store = seeded_store(vec![], false);
    let generator = Arc::new(generator(store, WELL_FORMED_REPLY));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let generator = generator.clone();
        handles.push(tokio::spawn(async move { generator.generate(&input(false)).await }));
    }
    for handle in handles {
        let prompt = handle.await.unwrap().unwrap();
        assert_eq!(prompt.instructions, "I");
    }
}
