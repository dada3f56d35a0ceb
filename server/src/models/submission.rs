use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::validation::FieldError;

/// Longest `name` or `location` accepted, in characters.
pub const MAX_TEXT_LENGTH: usize = 255;

/// Event fields as sent by a client on create and update.
///
/// Every field is optional at the wire level so that missing values are
/// reported as field errors instead of failing deserialization. Timestamps
/// are local date-times; seconds and fractions may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventSubmission {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "deserialize_local_date_time")]
    pub begin_enrollment_date_time: Option<NaiveDateTime>,
    #[serde(deserialize_with = "deserialize_local_date_time")]
    pub close_enrollment_date_time: Option<NaiveDateTime>,
    #[serde(deserialize_with = "deserialize_local_date_time")]
    pub begin_event_date_time: Option<NaiveDateTime>,
    #[serde(deserialize_with = "deserialize_local_date_time")]
    pub end_event_date_time: Option<NaiveDateTime>,
    pub base_price: Option<i64>,
    pub max_price: Option<i64>,
    pub limit_of_enrollment: Option<i64>,
}

/// A submission that passed structural validation.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub location: Option<String>,
    pub begin_enrollment_date_time: NaiveDateTime,
    pub close_enrollment_date_time: NaiveDateTime,
    pub begin_event_date_time: NaiveDateTime,
    pub end_event_date_time: NaiveDateTime,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
}

impl EventSubmission {
    /// Structural pass: required fields, blank strings, text lengths and
    /// numeric ranges. A missing `description` becomes empty and a missing
    /// `limitOfEnrollment` becomes zero.
    ///
    /// Collects every problem rather than stopping at the first one.
    pub fn into_draft(self) -> Result<EventDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = required_text("name", self.name, &mut errors);
        let location = match self.location {
            Some(text) => bounded_text("location", text, &mut errors).map(Some),
            None => Some(None),
        };
        let begin_enrollment = required_time(
            "beginEnrollmentDateTime",
            self.begin_enrollment_date_time,
            &mut errors,
        );
        let close_enrollment = required_time(
            "closeEnrollmentDateTime",
            self.close_enrollment_date_time,
            &mut errors,
        );
        let begin_event =
            required_time("beginEventDateTime", self.begin_event_date_time, &mut errors);
        let end_event = required_time("endEventDateTime", self.end_event_date_time, &mut errors);
        let base_price = non_negative("basePrice", self.base_price, &mut errors);
        let max_price = non_negative("maxPrice", self.max_price, &mut errors);
        let limit_of_enrollment = non_negative(
            "limitOfEnrollment",
            Some(self.limit_of_enrollment.unwrap_or(0)),
            &mut errors,
        );

        match (
            name,
            location,
            begin_enrollment,
            close_enrollment,
            begin_event,
            end_event,
            base_price,
            max_price,
            limit_of_enrollment,
        ) {
            (
                Some(name),
                Some(location),
                Some(begin_enrollment_date_time),
                Some(close_enrollment_date_time),
                Some(begin_event_date_time),
                Some(end_event_date_time),
                Some(base_price),
                Some(max_price),
                Some(limit_of_enrollment),
            ) if errors.is_empty() => Ok(EventDraft {
                name,
                description: self.description.unwrap_or_default(),
                location,
                begin_enrollment_date_time,
                close_enrollment_date_time,
                begin_event_date_time,
                end_event_date_time,
                base_price,
                max_price,
                limit_of_enrollment,
            }),
            _ => Err(errors),
        }
    }
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => bounded_text(field, text, errors),
        other => {
            let rejected = other.map(Value::String).unwrap_or(Value::Null);
            errors.push(FieldError::new(field, "NotEmpty", rejected, "must not be empty"));
            None
        }
    }
}

fn bounded_text(
    field: &'static str,
    text: String,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    if text.chars().count() > MAX_TEXT_LENGTH {
        errors.push(FieldError::new(
            field,
            "Size",
            Value::String(text),
            format!("size must be between 0 and {}", MAX_TEXT_LENGTH),
        ));
        return None;
    }
    Some(text)
}

fn required_time(
    field: &'static str,
    value: Option<NaiveDateTime>,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDateTime> {
    if value.is_none() {
        errors.push(FieldError::new(field, "NotNull", Value::Null, "must not be null"));
    }
    value
}

fn non_negative(
    field: &'static str,
    value: Option<i64>,
    errors: &mut Vec<FieldError>,
) -> Option<i32> {
    let Some(number) = value else {
        errors.push(FieldError::new(field, "NotNull", Value::Null, "must not be null"));
        return None;
    };

    if number < 0 {
        errors.push(FieldError::new(
            field,
            "Min",
            Value::from(number),
            "must be greater than or equal to 0",
        ));
        return None;
    }

    match i32::try_from(number) {
        Ok(number) => Some(number),
        Err(_) => {
            errors.push(FieldError::new(
                field,
                "Max",
                Value::from(number),
                format!("must be less than or equal to {}", i32::MAX),
            ));
            None
        }
    }
}

/// Parses `yyyy-MM-ddTHH:mm[:ss[.fff]]`.
pub fn parse_local_date_time(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
}

fn deserialize_local_date_time<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_local_date_time(&raw)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid date-time `{}`: {}", raw, e))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 11, day)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap()
    }

    fn complete() -> EventSubmission {
        EventSubmission {
            name: Some("Spring".to_string()),
            description: Some("REST API development".to_string()),
            location: None,
            begin_enrollment_date_time: Some(at(2)),
            close_enrollment_date_time: Some(at(3)),
            begin_event_date_time: Some(at(4)),
            end_event_date_time: Some(at(5)),
            base_price: Some(100),
            max_price: Some(200),
            limit_of_enrollment: Some(100),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().filter_map(|e| e.field.as_deref()).collect()
    }

    #[test]
    fn test_complete_submission_becomes_draft() {
        let draft = complete().into_draft().unwrap();
        assert_eq!(draft.name, "Spring");
        assert_eq!(draft.base_price, 100);
        assert_eq!(draft.location, None);
    }

    #[test]
    fn test_empty_submission_reports_every_required_field() {
        let errors = EventSubmission::default().into_draft().unwrap_err();
        assert_eq!(
            fields(&errors),
            vec![
                "name",
                "beginEnrollmentDateTime",
                "closeEnrollmentDateTime",
                "beginEventDateTime",
                "endEventDateTime",
                "basePrice",
                "maxPrice",
            ]
        );
    }

    #[test]
    fn test_blank_name_is_rejected_with_value() {
        let mut submission = complete();
        submission.name = Some("   ".to_string());

        let errors = submission.into_draft().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "NotEmpty");
        assert_eq!(errors[0].rejected_value, Value::String("   ".to_string()));
    }

    #[test]
    fn test_description_and_limit_default_when_absent() {
        let mut submission = complete();
        submission.description = None;
        submission.limit_of_enrollment = None;

        let draft = submission.into_draft().unwrap();
        assert_eq!(draft.description, "");
        assert_eq!(draft.limit_of_enrollment, 0);
    }

    #[test]
    fn test_name_and_location_length_is_bounded() {
        let mut submission = complete();
        submission.name = Some("a".repeat(MAX_TEXT_LENGTH));
        submission.location = Some("é".repeat(MAX_TEXT_LENGTH));
        assert!(submission.into_draft().is_ok());

        let mut submission = complete();
        submission.name = Some("a".repeat(MAX_TEXT_LENGTH + 1));
        submission.location = Some("b".repeat(MAX_TEXT_LENGTH + 1));

        let errors = submission.into_draft().unwrap_err();
        assert_eq!(fields(&errors), vec!["name", "location"]);
        assert!(errors.iter().all(|e| e.code == "Size"));
        assert_eq!(errors[0].default_message, "size must be between 0 and 255");
    }

    #[test]
    fn test_numeric_ranges() {
        let mut submission = complete();
        submission.base_price = Some(-1);
        submission.limit_of_enrollment = Some(i64::from(i32::MAX) + 1);

        let errors = submission.into_draft().unwrap_err();
        assert_eq!(fields(&errors), vec!["basePrice", "limitOfEnrollment"]);
        assert_eq!(errors[0].code, "Min");
        assert_eq!(errors[1].code, "Max");
    }

    #[test]
    fn test_deserializes_camel_case_json() {
        let submission: EventSubmission = serde_json::from_str(
            r#"{"name":"A","basePrice":0,"endEventDateTime":"2018-11-05T08:00:00"}"#,
        )
        .unwrap();

        assert_eq!(submission.name.as_deref(), Some("A"));
        assert_eq!(submission.base_price, Some(0));
        assert_eq!(submission.end_event_date_time, Some(at(5)));
        assert_eq!(submission.max_price, None);
    }

    #[test]
    fn test_accepts_minute_and_fraction_precision_times() {
        let submission: EventSubmission = serde_json::from_str(
            r#"{"beginEnrollmentDateTime":"2018-11-02T08:00",
                "endEventDateTime":"2018-11-05T08:00:00.250"}"#,
        )
        .unwrap();

        assert_eq!(submission.begin_enrollment_date_time, Some(at(2)));
        let end = submission.end_event_date_time.unwrap();
        assert_eq!(end.date(), at(5).date());
        assert_eq!(end.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_rejects_unparseable_times() {
        assert!(parse_local_date_time("2018-11-02").is_err());
        assert!(parse_local_date_time("2018-11-02 08:00").is_err());
        assert!(serde_json::from_str::<EventSubmission>(r#"{"beginEventDateTime":"soon"}"#).is_err());
        let submission: EventSubmission =
            serde_json::from_str(r#"{"beginEventDateTime":null}"#).unwrap();
        assert_eq!(submission.begin_event_date_time, None);
    }
}
