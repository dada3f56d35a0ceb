pub mod event;
pub mod submission;

pub use event::{Event, EventStatus, NewEvent};
pub use submission::{EventDraft, EventSubmission};
