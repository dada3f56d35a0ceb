use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{Event, EventSubmission, NewEvent};
use crate::repository::{EventRepository, Page, PageRequest};
use crate::utils::error::AppError;
use crate::validation::validate;

/// Create, read, update and list operations over the event repository.
#[derive(Clone)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, submission: EventSubmission) -> Result<Event, AppError> {
        let draft = validate(submission).map_err(AppError::ValidationError)?;

        let mut new_event = NewEvent::from_draft(draft);
        new_event.update();

        let event = self.repository.insert(new_event).await?;
        info!(event_id = event.id, free = event.free, "Event created");
        Ok(event)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Event>, AppError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Replaces every editable field of an existing event.
    ///
    /// The submission is validated before the lookup, so an invalid body is
    /// reported even when the event does not exist. The free flag keeps the
    /// value computed at creation.
    pub async fn update(
        &self,
        id: i64,
        submission: EventSubmission,
    ) -> Result<Option<Event>, AppError> {
        let draft = validate(submission).map_err(AppError::ValidationError)?;

        let Some(mut event) = self.repository.find_by_id(id).await? else {
            debug!(event_id = id, "Update target does not exist");
            return Ok(None);
        };

        event.apply(draft);
        let event = self.repository.save(&event).await?;
        info!(event_id = event.id, "Event updated");
        Ok(Some(event))
    }

    pub async fn list(&self, request: &PageRequest) -> Result<Page<Event>, AppError> {
        Ok(self.repository.find_all(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventStatus;
    use crate::repository::InMemoryEventRepository;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 11, day)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap()
    }

    fn service() -> EventService {
        EventService::new(Arc::new(InMemoryEventRepository::new()))
    }

    fn submission(base_price: i64, max_price: i64) -> EventSubmission {
        EventSubmission {
            name: Some("Spring".to_string()),
            description: Some("REST API development with Spring".to_string()),
            location: Some("D2 Factory".to_string()),
            begin_enrollment_date_time: Some(at(2)),
            close_enrollment_date_time: Some(at(3)),
            begin_event_date_time: Some(at(4)),
            end_event_date_time: Some(at(5)),
            base_price: Some(base_price),
            max_price: Some(max_price),
            limit_of_enrollment: Some(100),
        }
    }

    #[tokio::test]
    async fn test_create_derives_free_and_draft_status() {
        let service = service();

        let free = service.create(submission(0, 0)).await.unwrap();
        assert!(free.free);
        assert_eq!(free.event_status, EventStatus::Draft);

        let paid = service.create(submission(0, 1000)).await.unwrap();
        assert!(!paid.free);
        assert_ne!(free.id, paid.id);
    }

    #[tokio::test]
    async fn test_create_rejects_rule_violations() {
        let service = service();

        let result = service.create(submission(1000, 500)).await;
        match result {
            Err(AppError::ValidationError(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field.as_deref(), Some("basePrice"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let page = service.list(&PageRequest::default()).await.unwrap();
        assert_eq!(page.total_elements, 0);
    }

    #[tokio::test]
    async fn test_find_missing_is_none() {
        assert!(service().find(19843).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_does_not_recompute_free() {
        let service = service();
        let created = service.create(submission(0, 0)).await.unwrap();
        assert!(created.free);

        let mut changed = submission(100, 200);
        changed.name = Some("Priced now".to_string());
        let updated = service
            .update(created.id, changed)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Priced now");
        assert_eq!(updated.base_price, 100);
        assert_eq!(updated.event_status, EventStatus::Draft);
        assert!(updated.free);
    }

    #[tokio::test]
    async fn test_update_missing_event() {
        let result = service().update(5, submission(0, 0)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let result = service().update(5, EventSubmission::default()).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
