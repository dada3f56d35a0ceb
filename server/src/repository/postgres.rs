use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::postgres::PgPool;
use sqlx::FromRow;

use super::{EventRepository, Page, PageRequest};
use crate::models::{Event, EventStatus, NewEvent};

const COLUMNS: &str = "id, name, description, location, \
    begin_enrollment_date_time, close_enrollment_date_time, \
    begin_event_date_time, end_event_date_time, \
    base_price, max_price, limit_of_enrollment, free, event_status";

#[derive(Debug, FromRow)]
struct EventRow {
    id: i64,
    name: String,
    description: String,
    location: Option<String>,
    begin_enrollment_date_time: NaiveDateTime,
    close_enrollment_date_time: NaiveDateTime,
    begin_event_date_time: NaiveDateTime,
    end_event_date_time: NaiveDateTime,
    base_price: i32,
    max_price: i32,
    limit_of_enrollment: i32,
    free: bool,
    event_status: String,
}

impl TryFrom<EventRow> for Event {
    type Error = sqlx::Error;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let event_status = row
            .event_status
            .parse::<EventStatus>()
            .map_err(|e| sqlx::Error::Decode(e.into()))?;

        Ok(Event {
            id: row.id,
            name: row.name,
            description: row.description,
            location: row.location,
            begin_enrollment_date_time: row.begin_enrollment_date_time,
            close_enrollment_date_time: row.close_enrollment_date_time,
            begin_event_date_time: row.begin_event_date_time,
            end_event_date_time: row.end_event_date_time,
            base_price: row.base_price,
            max_price: row.max_price,
            limit_of_enrollment: row.limit_of_enrollment,
            free: row.free,
            event_status,
        })
    }
}

/// Event store backed by the `events` table.
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn insert(&self, event: NewEvent) -> Result<Event, sqlx::Error> {
        let sql = format!(
            "INSERT INTO events (name, description, location, \
                begin_enrollment_date_time, close_enrollment_date_time, \
                begin_event_date_time, end_event_date_time, \
                base_price, max_price, limit_of_enrollment, free, event_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {}",
            COLUMNS
        );

        let row: EventRow = sqlx::query_as(&sql)
            .bind(&event.name)
            .bind(&event.description)
            .bind(&event.location)
            .bind(event.begin_enrollment_date_time)
            .bind(event.close_enrollment_date_time)
            .bind(event.begin_event_date_time)
            .bind(event.end_event_date_time)
            .bind(event.base_price)
            .bind(event.max_price)
            .bind(event.limit_of_enrollment)
            .bind(event.free)
            .bind(event.event_status.as_str())
            .fetch_one(&self.pool)
            .await?;

        Event::try_from(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, sqlx::Error> {
        let sql = format!("SELECT {} FROM events WHERE id = $1", COLUMNS);
        let row: Option<EventRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Event::try_from).transpose()
    }

    async fn save(&self, event: &Event) -> Result<Event, sqlx::Error> {
        let sql = format!(
            "UPDATE events SET name = $2, description = $3, location = $4, \
                begin_enrollment_date_time = $5, close_enrollment_date_time = $6, \
                begin_event_date_time = $7, end_event_date_time = $8, \
                base_price = $9, max_price = $10, limit_of_enrollment = $11, \
                free = $12, event_status = $13 \
             WHERE id = $1 \
             RETURNING {}",
            COLUMNS
        );

        let row: EventRow = sqlx::query_as(&sql)
            .bind(event.id)
            .bind(&event.name)
            .bind(&event.description)
            .bind(&event.location)
            .bind(event.begin_enrollment_date_time)
            .bind(event.close_enrollment_date_time)
            .bind(event.begin_event_date_time)
            .bind(event.end_event_date_time)
            .bind(event.base_price)
            .bind(event.max_price)
            .bind(event.limit_of_enrollment)
            .bind(event.free)
            .bind(event.event_status.as_str())
            .fetch_one(&self.pool)
            .await?;

        Event::try_from(row)
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Event>, sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        // Sort columns come from a fixed whitelist, never from raw input
        let order_by = match request.sort {
            Some(sort) => format!(
                "{} {}, id ASC",
                sort.property.column(),
                sort.direction.sql()
            ),
            None => "id ASC".to_string(),
        };
        let sql = format!(
            "SELECT {} FROM events ORDER BY {} LIMIT $1 OFFSET $2",
            COLUMNS, order_by
        );

        let rows: Vec<EventRow> = sqlx::query_as(&sql)
            .bind(i64::from(request.size))
            .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        let content = rows
            .into_iter()
            .map(Event::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, request, u64::try_from(total).unwrap_or(0)))
    }
}
