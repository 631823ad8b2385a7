pub mod gemini_http;
pub mod memory_record_store;
pub mod model_runner;

pub use gemini_http::HttpGeminiBackend;
pub use memory_record_store::MemoryRecordStore;
pub use model_runner::{GOOGLE_GEN_API_KEY, ModelRunner};
