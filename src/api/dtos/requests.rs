use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::models::guest::GuestStatus;
use crate::domain::services::bulk::BulkAction;
use crate::domain::services::reminders::ReminderEntry;

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub host_name: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub rsvp_deadline: Option<DateTime<Utc>>,
    pub max_guests_per_invitee: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub host_name: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub rsvp_deadline: Option<DateTime<Utc>>,
    pub max_guests_per_invitee: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateReminderScheduleRequest {
    pub reminders: Vec<ReminderEntry>,
}

#[derive(Deserialize)]
pub struct CreateGuestRequest {
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub notify_by_email: Option<bool>,
    pub notify_by_sms: Option<bool>,
    pub max_guests: Option<i64>,
    pub send_invitation: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateGuestRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub notify_by_email: Option<bool>,
    pub notify_by_sms: Option<bool>,
    pub max_guests: Option<i64>,
}

#[derive(Deserialize)]
pub struct SubmitRsvpRequest {
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub status: GuestStatus,
    #[serde(default)]
    pub additional_guests: Vec<String>,
    pub dietary_notes: Option<String>,
}

#[derive(Deserialize)]
pub struct QuickRsvpParams {
    pub status: GuestStatus,
}

#[derive(Deserialize)]
pub struct BulkActionRequest {
    pub action: BulkAction,
    pub guest_ids: Vec<String>,
    pub status: Option<GuestStatus>,
}
