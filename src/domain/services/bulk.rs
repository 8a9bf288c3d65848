use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::warn;

use crate::domain::models::event::Event;
use crate::domain::models::guest::{Guest, GuestStatus};
use crate::domain::ports::GuestRepository;
use crate::domain::services::{guest_limit, rsvp};
use crate::domain::services::notifications::NotificationService;
use crate::error::AppError;

/// One stuck delivery must not stall the whole batch; a timed-out send is a
/// failure for that guest only.
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BulkAction {
    Invite,
    Remind,
    Delete,
    ChangeStatus,
}

#[derive(Debug, Default, Serialize)]
pub struct BulkOutcome {
    pub success_count: usize,
    pub failed_count: usize,
    pub errors: Vec<String>,
}

impl BulkOutcome {
    fn record_success(&mut self) {
        self.success_count += 1;
    }

    fn record_failure(&mut self, guest: &Guest, error: AppError) {
        self.failed_count += 1;
        self.errors.push(format!("{}: {}", guest.email, error));
    }
}

enum ResolvedAction {
    Invite,
    Remind,
    Delete,
    ChangeStatus(GuestStatus),
}

/// Applies one action across a set of guests belonging to `event`.
///
/// Ids that do not resolve to guests of this event are excluded up front;
/// an entirely empty resolution fails the call. After that, each guest is
/// processed independently: one guest's error is recorded and the loop moves
/// on. The caller decides how to surface a partial failure.
pub async fn run_bulk_action(
    guest_repo: &Arc<dyn GuestRepository>,
    notifications: &NotificationService,
    event: &Event,
    action: BulkAction,
    guest_ids: &[String],
    new_status: Option<GuestStatus>,
    now: DateTime<Utc>,
) -> Result<BulkOutcome, AppError> {
    let action = match (action, new_status) {
        (BulkAction::Invite, _) => ResolvedAction::Invite,
        (BulkAction::Remind, _) => ResolvedAction::Remind,
        (BulkAction::Delete, _) => ResolvedAction::Delete,
        (BulkAction::ChangeStatus, Some(status)) => ResolvedAction::ChangeStatus(status),
        (BulkAction::ChangeStatus, None) => {
            return Err(AppError::Validation("changeStatus requires a status".into()));
        }
    };

    let guests = guest_repo.find_by_ids(&event.id, guest_ids).await?;
    if guests.is_empty() {
        return Err(AppError::NotFound("No guests matched the given ids for this event".into()));
    }

    let mut outcome = BulkOutcome::default();
    for guest in &guests {
        match process_guest(guest_repo, notifications, event, &action, guest, now).await {
            Ok(()) => outcome.record_success(),
            Err(e) => {
                warn!("Bulk action failed for guest {}: {}", guest.id, e);
                outcome.record_failure(guest, e);
            }
        }
    }

    Ok(outcome)
}

async fn process_guest(
    guest_repo: &Arc<dyn GuestRepository>,
    notifications: &NotificationService,
    event: &Event,
    action: &ResolvedAction,
    guest: &Guest,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    match action {
        ResolvedAction::Invite => {
            // A guest with no enabled channel is a success with nothing sent.
            bounded(notifications.send_invitation(event, guest), "invitation").await?;
            Ok(())
        }
        ResolvedAction::Remind => {
            if guest.status != GuestStatus::Pending || guest.reminder_sent_at.is_some() {
                return Ok(());
            }
            let sent = bounded(notifications.send_reminder(event, guest), "reminder").await?;
            if sent {
                guest_repo.mark_reminder_sent(&guest.id, now).await?;
            }
            Ok(())
        }
        ResolvedAction::Delete => guest_repo.delete(&event.id, &guest.id).await,
        ResolvedAction::ChangeStatus(status) => {
            if *status == GuestStatus::Attending {
                let additional = guest_repo.count_additional_guests(&guest.id).await?;
                guest_limit::check(event.max_guests_per_invitee, additional as usize, guest.max_guests)
                    .map_err(AppError::CapacityExceeded)?;
            }

            let mut updated = guest.clone();
            rsvp::apply_status(&mut updated, *status, now);
            if *status != GuestStatus::Attending {
                guest_repo.replace_additional_guests(&guest.id, &[]).await?;
            }
            guest_repo.update(&updated).await?;
            Ok(())
        }
    }
}

async fn bounded<F>(send: F, what: &str) -> Result<bool, AppError>
where
    F: Future<Output = Result<bool, AppError>>,
{
    match timeout(NOTIFY_TIMEOUT, send).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Notification(format!("{} send timed out", what))),
    }
}
