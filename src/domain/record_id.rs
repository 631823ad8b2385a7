use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Validated identifier for a stored record.
///
/// The record store assigns identifiers; this type only enforces the shape
/// callers may pass back in: non-empty, no path separators, alphanumeric
/// with hyphens or underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Validate and create a new record id.
    pub fn new(id: &str) -> Result<Self, AppError> {
        if is_valid_record_id(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(AppError::InvalidRecordId(id.to_string()))
        }
    }

    /// Return the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecordId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RecordId::new(&value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Checks:
/// - Non-empty
/// - No path separators (/, \)
/// - Not "." or ".."
/// - Characters are alphanumeric, '-', or '_'
fn is_valid_record_id(id: &str) -> bool {
    if id.is_empty() {
        return false;
    }
    if id.contains('/') || id.contains('\\') {
        return false;
    }
    if id == "." || id == ".." {
        return false;
    }
    id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
