//! The structured generation artifact and its validating parser.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Upper bound on raw reply text attached to a parse error for diagnosis.
const MAX_RAW_DIAGNOSTIC_CHARS: usize = 2048;

/// The validated `{instructions, rubric}` pair attached to an assignment.
///
/// Both fields are markdown suitable for direct display. A value of this
/// type is only obtainable through [`GeneratedSystemPrompt::parse`] or by
/// constructing fields that pass the same checks, so downstream persistence
/// never sees a malformed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSystemPrompt {
    /// Detailed instructions for students.
    pub instructions: String,
    /// Grading criteria and assessment framework.
    pub rubric: String,
}

impl GeneratedSystemPrompt {
    /// Parse and validate a backend's textual reply.
    ///
    /// Fails with [`AppError::MalformedResponse`] when the text is not
    /// structured data, is missing either field, or either field is blank.
    /// Extra fields are tolerated; there is no partial recovery.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let parsed: Self = serde_json::from_str(raw)
            .map_err(|err| malformed(err.to_string(), raw))?;

        if parsed.instructions.trim().is_empty() {
            return Err(malformed("field 'instructions' is empty", raw));
        }
        if parsed.rubric.trim().is_empty() {
            return Err(malformed("field 'rubric' is empty", raw));
        }

        Ok(parsed)
    }

    /// Serialized form stored on the assignment record.
    pub fn to_stored_payload(&self) -> String {
        serde_json::to_string(self).expect("two string fields always serialize")
    }

    /// Parse a payload previously produced by [`to_stored_payload`].
    ///
    /// [`to_stored_payload`]: GeneratedSystemPrompt::to_stored_payload
    pub fn from_stored_payload(raw: &str) -> Result<Self, AppError> {
        Self::parse(raw)
    }
}

fn malformed(reason: impl Into<String>, raw: &str) -> AppError {
    AppError::MalformedResponse { reason: reason.into(), raw: truncate_raw(raw) }
}

/// Truncate a raw reply for error context, replacing control characters so
/// the text is safe to log on one line.
pub(crate) fn truncate_raw(raw: &str) -> String {
    let mut output = String::new();
    for (count, ch) in raw.chars().enumerate() {
        if count >= MAX_RAW_DIAGNOSTIC_CHARS {
            output.push_str(" [truncated]");
            break;
        }
        output.push(if ch.is_control() { ' ' } else { ch });
    }
    output
}
