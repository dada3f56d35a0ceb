use std::sync::Arc;

use crate::repository::EventRepository;
use crate::services::EventService;

/// Shared handler state, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub events: EventService,
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(repository: Arc<dyn EventRepository>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            events: EventService::new(repository),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }
}
