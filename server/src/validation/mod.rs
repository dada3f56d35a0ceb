//! Two-phase validation of event submissions.
//!
//! Phase one is structural (see [`EventSubmission::into_draft`]); phase two
//! checks the ordering rules between fields and only runs when phase one
//! produced a complete draft.

mod rules;

use serde::Serialize;
use serde_json::Value;

use crate::models::{EventDraft, EventSubmission};

pub use rules::check_rules;

pub const OBJECT_NAME: &str = "eventSubmission";

/// A single rejected value, serialized the way API clients receive it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub object_name: &'static str,
    pub field: Option<String>,
    pub code: &'static str,
    pub rejected_value: Value,
    pub default_message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: &'static str,
        rejected_value: Value,
        message: impl Into<String>,
    ) -> Self {
        Self {
            object_name: OBJECT_NAME,
            field: Some(field.into()),
            code,
            rejected_value,
            default_message: message.into(),
        }
    }

    /// An error about the submission as a whole, e.g. an unreadable body.
    pub fn object(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            object_name: OBJECT_NAME,
            field: None,
            code,
            rejected_value: Value::Null,
            default_message: message.into(),
        }
    }
}

pub fn validate(submission: EventSubmission) -> Result<EventDraft, Vec<FieldError>> {
    let draft = submission.into_draft()?;

    let errors = check_rules(&draft);
    if errors.is_empty() {
        Ok(draft)
    } else {
        Err(errors)
    }
}
