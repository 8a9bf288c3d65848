use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const EVENT_COLUMNS: &str = "id, title, host_name, location, starts_at, rsvp_deadline, max_guests_per_invitee, reminder_schedule, created_at";

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            &format!("INSERT INTO events ({EVENT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {EVENT_COLUMNS}"),
        )
            .bind(&event.id)
            .bind(&event.title)
            .bind(&event.host_name)
            .bind(&event.location)
            .bind(event.starts_at)
            .bind(event.rsvp_deadline)
            .bind(event.max_guests_per_invitee)
            .bind(&event.reminder_schedule)
            .bind(event.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?"),
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            &format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY starts_at"),
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            &format!("UPDATE events SET title=?, host_name=?, location=?, starts_at=?, rsvp_deadline=?, max_guests_per_invitee=?, reminder_schedule=? WHERE id=? RETURNING {EVENT_COLUMNS}"),
        )
            .bind(&event.title)
            .bind(&event.host_name)
            .bind(&event.location)
            .bind(event.starts_at)
            .bind(event.rsvp_deadline)
            .bind(event.max_guests_per_invitee)
            .bind(&event.reminder_schedule)
            .bind(&event.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}
