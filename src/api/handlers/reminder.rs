use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::responses::ReminderRunResponse;
use crate::api::extractors::host::HostKey;
use crate::domain::models::guest::GuestStatus;
use crate::domain::services::reminders;
use crate::error::AppError;
use crate::state::AppState;

/// One dispatch pass, driven by an external scheduler (cron hits this
/// endpoint). Nudges PENDING guests of events whose schedule has a due entry;
/// `reminder_sent_at` caps it at one reminder per guest, so duplicate
/// schedule entries and repeated passes stay idempotent.
pub async fn run_reminder_pass(
    State(state): State<Arc<AppState>>,
    _host: HostKey,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let events = state.event_repo.list().await?;

    let mut events_checked = 0;
    let mut reminders_sent = 0;
    let mut failures = 0;

    for event in events {
        let schedule = reminders::parse(event.reminder_schedule.as_deref());
        if schedule.is_empty() {
            continue;
        }
        events_checked += 1;

        if !reminders::schedule_due(&schedule, event.starts_at, now) {
            continue;
        }

        let guests = state.guest_repo.list_by_event(&event.id).await?;
        for guest in guests {
            if guest.status != GuestStatus::Pending || guest.reminder_sent_at.is_some() {
                continue;
            }

            match state.notifications.send_reminder(&event, &guest).await {
                Ok(true) => {
                    state.guest_repo.mark_reminder_sent(&guest.id, now).await?;
                    reminders_sent += 1;
                }
                Ok(false) => {
                    // No enabled channel; nothing sent, nothing recorded.
                }
                Err(e) => {
                    warn!("Reminder send failed for guest {}: {}", guest.id, e);
                    failures += 1;
                }
            }
        }
    }

    info!(
        "Reminder pass: {} events checked, {} sent, {} failed",
        events_checked, reminders_sent, failures
    );

    Ok(Json(ReminderRunResponse { events_checked, reminders_sent, failures }))
}
