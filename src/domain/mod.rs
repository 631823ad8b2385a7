pub mod configuration;
pub mod entities;
pub mod error;
pub mod generated_prompt;
pub mod message;
pub mod prompt;
pub mod record_id;

pub use configuration::{GeminiApiConfig, GenerationConfig, ModelType, ServiceConfig};
pub use entities::{
    Assignment, AssignmentCategory, AssignmentInput, AssignmentSubCategory,
    CategoryWithSubCategories, Course, GenerationRequest,
};
pub use error::AppError;
pub use generated_prompt::GeneratedSystemPrompt;
pub use message::{ChatMessage, Role};
pub use prompt::{compose, placeholder};
pub use record_id::RecordId;
