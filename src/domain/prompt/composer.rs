//! Composes the single structured generation request sent to the model
//! backend adapter.
//!
//! Composition is deterministic and side-effect free: identical inputs
//! always produce identical composed content.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::domain::AppError;
use crate::domain::entities::{Course, GenerationRequest};
use crate::domain::message::ChatMessage;

/// Placeholder policy for omitted context.
///
/// Kept as named constants rather than inline literals so the exact text is
/// assertable and stable.
pub mod placeholder {
    /// Optional free-text field the author left empty.
    pub const NOT_PROVIDED: &str = "Not provided";
    /// No course reference was given, or the reference did not resolve.
    pub const NO_COURSE_CONTEXT: &str = "No course context provided";
    pub const SUBJECT_LINKED: &str = "Linked to subject";
    pub const SUBJECT_NONE: &str = "No subject specified";
    pub const GRADE_LINKED: &str = "Linked to grade";
    pub const GRADE_NONE: &str = "No grade specified";
}

const ASSIGNMENT_PROMPT_TEMPLATE: &str = include_str!("assignment_prompt.j2");

#[derive(Serialize)]
struct PromptVars<'a> {
    title: &'a str,
    description: &'a str,
    learning_objectives: &'a str,
    course: Option<CourseVars<'a>>,
    no_course: &'static str,
    category: CategoryVars<'a>,
    sub_categories: Vec<SubCategoryVars<'a>>,
}

#[derive(Serialize)]
struct CourseVars<'a> {
    title: &'a str,
    description: &'a str,
    subject: &'static str,
    grade: &'static str,
    system_prompt: &'a str,
}

#[derive(Serialize)]
struct CategoryVars<'a> {
    title: &'a str,
    subtitle: &'a str,
}

#[derive(Serialize)]
struct SubCategoryVars<'a> {
    title: &'a str,
    description: &'a str,
    system_prompt: &'a str,
}

/// Render the composite request as exactly one user-role message.
///
/// Rendering only fails on template/context drift, which is a programming
/// error rather than a runtime branch.
pub fn compose(request: &GenerationRequest) -> Result<Vec<ChatMessage>, AppError> {
    let vars = build_vars(request);

    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    let content = env
        .render_str(ASSIGNMENT_PROMPT_TEMPLATE, &vars)
        .map_err(|err| AppError::PromptComposition(err.to_string()))?;

    Ok(vec![ChatMessage::user(content)])
}

fn build_vars(request: &GenerationRequest) -> PromptVars<'_> {
    let input = &request.input;
    let category = &request.category;

    PromptVars {
        title: &input.title,
        description: input.description.as_deref().unwrap_or(placeholder::NOT_PROVIDED),
        learning_objectives: input
            .learning_objectives
            .as_deref()
            .unwrap_or(placeholder::NOT_PROVIDED),
        course: request.course.as_ref().map(course_vars),
        no_course: placeholder::NO_COURSE_CONTEXT,
        category: CategoryVars {
            title: &category.category.title,
            subtitle: category
                .category
                .subtitle
                .as_deref()
                .unwrap_or(placeholder::NOT_PROVIDED),
        },
        sub_categories: category
            .sub_categories
            .iter()
            .map(|sub| SubCategoryVars {
                title: &sub.title,
                description: sub.description.as_deref().unwrap_or(placeholder::NOT_PROVIDED),
                system_prompt: &sub.system_prompt,
            })
            .collect(),
    }
}

fn course_vars(course: &Course) -> CourseVars<'_> {
    CourseVars {
        title: &course.title,
        description: &course.description,
        subject: if course.subject_id.is_some() {
            placeholder::SUBJECT_LINKED
        } else {
            placeholder::SUBJECT_NONE
        },
        grade: if course.grade_id.is_some() {
            placeholder::GRADE_LINKED
        } else {
            placeholder::GRADE_NONE
        },
        system_prompt: &course.system_prompt,
    }
}
