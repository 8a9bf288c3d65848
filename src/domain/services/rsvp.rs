use chrono::{DateTime, Utc};

use crate::domain::models::event::Event;
use crate::domain::models::guest::{Guest, GuestStatus};
use crate::error::AppError;

/// Moves a guest to a new status and keeps the derived fields consistent.
///
/// `responded_at` is stamped on any transition away from PENDING and cleared
/// if the guest ever returns to PENDING. Dietary notes only survive while
/// ATTENDING. Re-applying the same status overwrites these fields
/// deterministically, so resubmission is safe.
pub fn apply_status(guest: &mut Guest, new_status: GuestStatus, now: DateTime<Utc>) {
    guest.status = new_status;
    guest.responded_at = match new_status {
        GuestStatus::Pending => None,
        _ => Some(now),
    };
    if new_status != GuestStatus::Attending {
        guest.dietary_notes = None;
    }
}

/// Additional guests exist only while ATTENDING; any other status collapses
/// the set to empty.
pub fn normalized_additional_guests(status: GuestStatus, names: Vec<String>) -> Vec<String> {
    match status {
        GuestStatus::Attending => names,
        _ => Vec::new(),
    }
}

/// Public self-service guard. Host-initiated administrative changes (bulk
/// operations) bypass this on purpose.
pub fn ensure_rsvp_open(event: &Event, now: DateTime<Utc>) -> Result<(), AppError> {
    if let Some(deadline) = event.rsvp_deadline {
        if now > deadline {
            return Err(AppError::DeadlinePassed(format!(
                "The RSVP deadline for '{}' has passed",
                event.title
            )));
        }
    }
    Ok(())
}
