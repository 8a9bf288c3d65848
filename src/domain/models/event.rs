use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub host_name: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub rsvp_deadline: Option<DateTime<Utc>>,
    /// Default party-size cap per invitee. None = unlimited.
    pub max_guests_per_invitee: Option<i64>,
    /// Serialized reminder schedule. See domain::services::reminders.
    pub reminder_schedule: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub title: String,
    pub host_name: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub rsvp_deadline: Option<DateTime<Utc>>,
    pub max_guests_per_invitee: Option<i64>,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            host_name: params.host_name,
            location: params.location,
            starts_at: params.starts_at,
            rsvp_deadline: params.rsvp_deadline,
            max_guests_per_invitee: params.max_guests_per_invitee,
            reminder_schedule: None,
            created_at: Utc::now(),
        }
    }
}
