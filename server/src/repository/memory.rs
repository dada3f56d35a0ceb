use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{EventRepository, Page, PageRequest};
use crate::models::{Event, NewEvent};

#[derive(Default)]
struct Store {
    next_id: i64,
    events: BTreeMap<i64, Event>,
}

/// Process-local event store, used when no database is configured.
#[derive(Default)]
pub struct InMemoryEventRepository {
    store: RwLock<Store>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn insert(&self, event: NewEvent) -> Result<Event, sqlx::Error> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let event = Event::from_new(store.next_id, event);
        store.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, sqlx::Error> {
        let store = self.store.read().await;
        Ok(store.events.get(&id).cloned())
    }

    async fn save(&self, event: &Event) -> Result<Event, sqlx::Error> {
        let mut store = self.store.write().await;
        match store.events.get_mut(&event.id) {
            Some(stored) => {
                *stored = event.clone();
                Ok(event.clone())
            }
            None => Err(sqlx::Error::RowNotFound),
        }
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Event>, sqlx::Error> {
        let store = self.store.read().await;

        // BTreeMap iteration is already id order
        let mut events: Vec<&Event> = store.events.values().collect();
        if let Some(sort) = request.sort {
            events.sort_by(|a, b| sort.compare(a, b));
        }

        let total = events.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = events
            .into_iter()
            .skip(offset)
            .take(request.size as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, request, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventDraft, EventStatus};
    use crate::repository::Sort;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 11, day)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap()
    }

    fn new_event(name: &str, base_price: i32) -> NewEvent {
        NewEvent::from_draft(EventDraft {
            name: name.to_string(),
            description: "test".to_string(),
            location: None,
            begin_enrollment_date_time: at(2),
            close_enrollment_date_time: at(3),
            begin_event_date_time: at(4),
            end_event_date_time: at(5),
            base_price,
            max_price: 1000,
            limit_of_enrollment: 10,
        })
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repository = InMemoryEventRepository::new();
        let first = repository.insert(new_event("a", 0)).await.unwrap();
        let second = repository.insert(new_event("b", 0)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repository.find_by_id(2).await.unwrap(), Some(second));
        assert_eq!(repository.find_by_id(3).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_overwrites_existing() {
        let repository = InMemoryEventRepository::new();
        let mut event = repository.insert(new_event("a", 0)).await.unwrap();
        event.name = "renamed".to_string();
        event.event_status = EventStatus::Published;

        repository.save(&event).await.unwrap();
        let stored = repository.find_by_id(event.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "renamed");
        assert_eq!(stored.event_status, EventStatus::Published);
    }

    #[tokio::test]
    async fn test_save_unknown_id_fails() {
        let repository = InMemoryEventRepository::new();
        let event = Event::from_new(42, new_event("ghost", 0));
        assert!(matches!(
            repository.save(&event).await,
            Err(sqlx::Error::RowNotFound)
        ));
    }

    #[tokio::test]
    async fn test_find_all_pages_in_insertion_order() {
        let repository = InMemoryEventRepository::new();
        for i in 0..30 {
            repository
                .insert(new_event(&format!("event {}", i), 0))
                .await
                .unwrap();
        }

        let page = repository.find_all(&PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.total_elements, 30);
        assert_eq!(page.content[0].id, 11);
        assert_eq!(page.content[9].id, 20);

        let beyond = repository.find_all(&PageRequest::new(5, 10)).await.unwrap();
        assert!(beyond.content.is_empty());
        assert_eq!(beyond.total_elements, 30);
    }

    #[tokio::test]
    async fn test_find_all_sorted() {
        let repository = InMemoryEventRepository::new();
        for (name, price) in [("b", 300), ("c", 100), ("a", 200)] {
            repository.insert(new_event(name, price)).await.unwrap();
        }

        let request = PageRequest::new(0, 10).with_sort(Sort::parse("basePrice,desc"));
        let page = repository.find_all(&request).await.unwrap();
        let names: Vec<_> = page.content.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
