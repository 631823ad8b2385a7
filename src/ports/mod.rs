mod model_backend;
mod record_store;

pub use model_backend::{MockModelBackend, ModelBackend};
pub use record_store::RecordStore;
