use crate::domain::models::{
    event::Event,
    guest::{AdditionalGuest, Guest},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<Guest>, AppError>;
    async fn find_by_email(&self, event_id: &str, email: &str) -> Result<Option<Guest>, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Guest>, AppError>;
    /// Resolves only guests that exist AND belong to the event. Unknown or
    /// foreign ids are dropped from the result, not errors.
    async fn find_by_ids(&self, event_id: &str, ids: &[String]) -> Result<Vec<Guest>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Guest>, AppError>;
    async fn update(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError>;
    async fn mark_reminder_sent(&self, id: &str, at: DateTime<Utc>) -> Result<(), AppError>;
    /// Delete-all then recreate. The additional guest set is never patched.
    async fn replace_additional_guests(&self, guest_id: &str, names: &[String]) -> Result<Vec<AdditionalGuest>, AppError>;
    async fn list_additional_guests(&self, guest_id: &str) -> Result<Vec<AdditionalGuest>, AppError>;
    async fn count_additional_guests(&self, guest_id: &str) -> Result<i64, AppError>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, phone: &str, body: &str) -> Result<(), AppError>;
}
