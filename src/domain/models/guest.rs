use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuestStatus {
    Pending,
    Attending,
    NotAttending,
    Maybe,
}

impl GuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestStatus::Pending => "PENDING",
            GuestStatus::Attending => "ATTENDING",
            GuestStatus::NotAttending => "NOT_ATTENDING",
            GuestStatus::Maybe => "MAYBE",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Guest {
    pub id: String,
    pub event_id: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub status: GuestStatus,
    /// Self-service credential for the public RSVP routes. Never rotated.
    pub token: String,
    pub notify_by_email: bool,
    pub notify_by_sms: bool,
    /// Per-guest party-size cap. None = defer to the event default.
    pub max_guests: Option<i64>,
    pub dietary_notes: Option<String>,
    pub invited_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub reminder_sent_at: Option<DateTime<Utc>>,
}

pub struct NewGuestParams {
    pub event_id: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub notify_by_email: bool,
    pub notify_by_sms: bool,
    pub max_guests: Option<i64>,
}

impl Guest {
    pub fn new(params: NewGuestParams) -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            event_id: params.event_id,
            email: params.email,
            name: params.name,
            phone: params.phone,
            status: GuestStatus::Pending,
            token,
            notify_by_email: params.notify_by_email,
            notify_by_sms: params.notify_by_sms,
            max_guests: params.max_guests,
            dietary_notes: None,
            invited_at: Utc::now(),
            responded_at: None,
            reminder_sent_at: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AdditionalGuest {
    pub id: String,
    pub guest_id: String,
    pub name: String,
}

impl AdditionalGuest {
    pub fn new(guest_id: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            guest_id,
            name,
        }
    }
}
