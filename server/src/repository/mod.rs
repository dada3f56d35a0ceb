use async_trait::async_trait;

use crate::models::{Event, NewEvent};

pub mod memory;
pub mod page;
pub mod postgres;

pub use memory::InMemoryEventRepository;
pub use page::{Direction, Page, PageRequest, Sort, SortProperty};
pub use postgres::PgEventRepository;

/// Storage for events.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Stores a new event and assigns its identifier.
    async fn insert(&self, event: NewEvent) -> Result<Event, sqlx::Error>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, sqlx::Error>;

    /// Overwrites the stored event with the same identifier.
    ///
    /// Returns `sqlx::Error::RowNotFound` if no such event exists.
    async fn save(&self, event: &Event) -> Result<Event, sqlx::Error>;

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Event>, sqlx::Error>;
}
