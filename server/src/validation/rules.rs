use chrono::NaiveDateTime;
use serde_json::Value;

use super::FieldError;
use crate::models::EventDraft;

const WRONG_VALUE: &str = "wrongValue";

/// Ordering rules between fields of a structurally valid draft.
///
/// Every violated rule yields its own error.
pub fn check_rules(draft: &EventDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let end = draft.end_event_date_time;

    let bounds = [
        ("beginEventDateTime", draft.begin_event_date_time),
        ("closeEnrollmentDateTime", draft.close_enrollment_date_time),
        ("beginEnrollmentDateTime", draft.begin_enrollment_date_time),
    ];
    for (other, bound) in bounds {
        if end < bound {
            errors.push(FieldError::new(
                "endEventDateTime",
                WRONG_VALUE,
                time_value(end),
                format!("endEventDateTime must not be before {}", other),
            ));
        }
    }

    if draft.base_price != 0 && draft.base_price > draft.max_price {
        errors.push(FieldError::new(
            "basePrice",
            WRONG_VALUE,
            Value::from(draft.base_price),
            "basePrice must not be greater than maxPrice",
        ));
    }

    errors
}

fn time_value(time: NaiveDateTime) -> Value {
    Value::String(time.format("%Y-%m-%dT%H:%M:%S").to_string())
}
