use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::submission::EventDraft;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    EndedEnrollment,
    BeganEnrollment,
    BeganEvent,
    EndedEvent,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "DRAFT",
            EventStatus::Published => "PUBLISHED",
            EventStatus::EndedEnrollment => "ENDED_ENROLLMENT",
            EventStatus::BeganEnrollment => "BEGAN_ENROLLMENT",
            EventStatus::BeganEvent => "BEGAN_EVENT",
            EventStatus::EndedEvent => "ENDED_EVENT",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(EventStatus::Draft),
            "PUBLISHED" => Ok(EventStatus::Published),
            "ENDED_ENROLLMENT" => Ok(EventStatus::EndedEnrollment),
            "BEGAN_ENROLLMENT" => Ok(EventStatus::BeganEnrollment),
            "BEGAN_EVENT" => Ok(EventStatus::BeganEvent),
            "ENDED_EVENT" => Ok(EventStatus::EndedEvent),
            other => Err(format!("unknown event status '{}'", other)),
        }
    }
}

/// A persisted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
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
    pub free: bool,
    pub event_status: EventStatus,
}

impl Event {
    pub fn from_new(id: i64, new_event: NewEvent) -> Self {
        Self {
            id,
            name: new_event.name,
            description: new_event.description,
            location: new_event.location,
            begin_enrollment_date_time: new_event.begin_enrollment_date_time,
            close_enrollment_date_time: new_event.close_enrollment_date_time,
            begin_event_date_time: new_event.begin_event_date_time,
            end_event_date_time: new_event.end_event_date_time,
            base_price: new_event.base_price,
            max_price: new_event.max_price,
            limit_of_enrollment: new_event.limit_of_enrollment,
            free: new_event.free,
            event_status: new_event.event_status,
        }
    }

    /// Overwrites every caller-editable field from `draft`.
    ///
    /// `id`, `event_status` and `free` are left as they are; in particular the
    /// free flag is not recomputed here, only [`NewEvent::update`] derives it.
    pub fn apply(&mut self, draft: EventDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.location = draft.location;
        self.begin_enrollment_date_time = draft.begin_enrollment_date_time;
        self.close_enrollment_date_time = draft.close_enrollment_date_time;
        self.begin_event_date_time = draft.begin_event_date_time;
        self.end_event_date_time = draft.end_event_date_time;
        self.base_price = draft.base_price;
        self.max_price = draft.max_price;
        self.limit_of_enrollment = draft.limit_of_enrollment;
    }
}

/// An event that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
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
    pub free: bool,
    pub event_status: EventStatus,
}

impl NewEvent {
    pub fn from_draft(draft: EventDraft) -> Self {
        Self {
            name: draft.name,
            description: draft.description,
            location: draft.location,
            begin_enrollment_date_time: draft.begin_enrollment_date_time,
            close_enrollment_date_time: draft.close_enrollment_date_time,
            begin_event_date_time: draft.begin_event_date_time,
            end_event_date_time: draft.end_event_date_time,
            base_price: draft.base_price,
            max_price: draft.max_price,
            limit_of_enrollment: draft.limit_of_enrollment,
            free: false,
            event_status: EventStatus::Draft,
        }
    }

    /// Recomputes derived state from the price fields.
    pub fn update(&mut self) {
        self.free = self.base_price == 0 && self.max_price == 0;
    }
}
