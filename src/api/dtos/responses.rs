use serde::Serialize;

use crate::domain::models::event::Event;
use crate::domain::models::guest::{AdditionalGuest, Guest};
use crate::domain::models::reminder::Reminder;
use crate::domain::services::reminders;

#[derive(Serialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: Event,
    pub reminders: Vec<Reminder>,
    pub reminder_labels: Vec<String>,
}

impl EventDetailResponse {
    pub fn from_event(event: Event) -> Self {
        let mut parsed = reminders::parse(event.reminder_schedule.as_deref());
        reminders::sort_for_display(&mut parsed);
        let reminder_labels = parsed.iter().map(reminders::format).collect();
        Self { event, reminders: parsed, reminder_labels }
    }
}

#[derive(Serialize)]
pub struct GuestDetailResponse {
    #[serde(flatten)]
    pub guest: Guest,
    pub additional_guests: Vec<AdditionalGuest>,
}

#[derive(Serialize)]
pub struct RsvpPageResponse {
    pub guest: GuestDetailResponse,
    pub event: EventDetailResponse,
}

#[derive(Serialize)]
pub struct QuickRsvpResponse {
    pub status: String,
    pub redirect_to: String,
}

#[derive(Serialize)]
pub struct ReminderRunResponse {
    pub events_checked: usize,
    pub reminders_sent: usize,
    pub failures: usize,
}
