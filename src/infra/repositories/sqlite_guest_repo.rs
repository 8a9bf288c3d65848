use crate::domain::{
    models::guest::{AdditionalGuest, Guest},
    ports::GuestRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteGuestRepo {
    pool: SqlitePool,
}

impl SqliteGuestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const GUEST_COLUMNS: &str = "id, event_id, email, name, phone, status, token, notify_by_email, notify_by_sms, max_guests, dietary_notes, invited_at, responded_at, reminder_sent_at";

#[async_trait]
impl GuestRepository for SqliteGuestRepo {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            &format!("INSERT INTO guests ({GUEST_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {GUEST_COLUMNS}"),
        )
            .bind(&guest.id)
            .bind(&guest.event_id)
            .bind(&guest.email)
            .bind(&guest.name)
            .bind(&guest.phone)
            .bind(guest.status)
            .bind(&guest.token)
            .bind(guest.notify_by_email)
            .bind(guest.notify_by_sms)
            .bind(guest.max_guests)
            .bind(&guest.dietary_notes)
            .bind(guest.invited_at)
            .bind(guest.responded_at)
            .bind(guest.reminder_sent_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(
            &format!("SELECT {GUEST_COLUMNS} FROM guests WHERE event_id = ? AND id = ?"),
        )
            .bind(event_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, event_id: &str, email: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(
            &format!("SELECT {GUEST_COLUMNS} FROM guests WHERE event_id = ? AND email = ?"),
        )
            .bind(event_id)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(
            &format!("SELECT {GUEST_COLUMNS} FROM guests WHERE token = ?"),
        )
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_ids(&self, event_id: &str, ids: &[String]) -> Result<Vec<Guest>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE event_id = ? AND id IN ({placeholders}) ORDER BY invited_at",
        );

        let mut query = sqlx::query_as::<_, Guest>(&sql).bind(event_id);
        for id in ids {
            query = query.bind(id);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(
            &format!("SELECT {GUEST_COLUMNS} FROM guests WHERE event_id = ? ORDER BY invited_at"),
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            &format!("UPDATE guests SET email=?, name=?, phone=?, status=?, notify_by_email=?, notify_by_sms=?, max_guests=?, dietary_notes=?, responded_at=?, reminder_sent_at=? WHERE id=? AND event_id=? RETURNING {GUEST_COLUMNS}"),
        )
            .bind(&guest.email)
            .bind(&guest.name)
            .bind(&guest.phone)
            .bind(guest.status)
            .bind(guest.notify_by_email)
            .bind(guest.notify_by_sms)
            .bind(guest.max_guests)
            .bind(&guest.dietary_notes)
            .bind(guest.responded_at)
            .bind(guest.reminder_sent_at)
            .bind(&guest.id)
            .bind(&guest.event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM guests WHERE id = ? AND event_id = ?")
            .bind(id)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Guest not found".into()));
        }
        Ok(())
    }

    async fn mark_reminder_sent(&self, id: &str, at: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query("UPDATE guests SET reminder_sent_at = ? WHERE id = ?")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn replace_additional_guests(&self, guest_id: &str, names: &[String]) -> Result<Vec<AdditionalGuest>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM additional_guests WHERE guest_id = ?")
            .bind(guest_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let mut created = Vec::with_capacity(names.len());
        for name in names {
            let entry = AdditionalGuest::new(guest_id.to_string(), name.clone());
            sqlx::query("INSERT INTO additional_guests (id, guest_id, name) VALUES (?, ?, ?)")
                .bind(&entry.id)
                .bind(&entry.guest_id)
                .bind(&entry.name)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            created.push(entry);
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn list_additional_guests(&self, guest_id: &str) -> Result<Vec<AdditionalGuest>, AppError> {
        sqlx::query_as::<_, AdditionalGuest>(
            "SELECT id, guest_id, name FROM additional_guests WHERE guest_id = ?",
        )
            .bind(guest_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_additional_guests(&self, guest_id: &str) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM additional_guests WHERE guest_id = ?")
            .bind(guest_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(count.0)
    }
}
