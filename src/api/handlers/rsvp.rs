use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::{QuickRsvpParams, SubmitRsvpRequest};
use crate::api::dtos::responses::{EventDetailResponse, GuestDetailResponse, RsvpPageResponse};
use crate::domain::models::guest::{Guest, GuestStatus, NewGuestParams};
use crate::domain::services::{guest_limit, rsvp};
use crate::error::AppError;
use crate::state::AppState;

/// Public email-keyed RSVP. Resubmission by the same email updates the
/// existing guest; the additional guest list is fully replaced each time.
pub async fn submit_rsvp(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<SubmitRsvpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    rsvp::ensure_rsvp_open(&event, now)?;

    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("Email must not be empty".into()));
    }

    let additional = rsvp::normalized_additional_guests(payload.status, payload.additional_guests);
    let existing = state.guest_repo.find_by_email(&event.id, &payload.email).await?;

    // Capacity is re-checked here, at the moment of the write. The rejection
    // leaves the stored guest untouched.
    if payload.status == GuestStatus::Attending {
        let per_guest_max = existing.as_ref().and_then(|g| g.max_guests);
        guest_limit::check(event.max_guests_per_invitee, additional.len(), per_guest_max)
            .map_err(AppError::CapacityExceeded)?;
    }

    let is_new = existing.is_none();
    let mut guest = existing.unwrap_or_else(|| Guest::new(NewGuestParams {
        event_id: event.id.clone(),
        email: payload.email.clone(),
        name: None,
        phone: None,
        notify_by_email: true,
        notify_by_sms: false,
        max_guests: None,
    }));

    if let Some(name) = payload.name { guest.name = Some(name); }
    if let Some(phone) = payload.phone { guest.phone = Some(phone); }
    guest.dietary_notes = payload.dietary_notes;
    rsvp::apply_status(&mut guest, payload.status, now);

    let saved = if is_new {
        state.guest_repo.create(&guest).await?
    } else {
        state.guest_repo.update(&guest).await?
    };
    let additional_guests = state.guest_repo.replace_additional_guests(&saved.id, &additional).await?;

    info!("RSVP recorded: guest {} -> {}", saved.id, saved.status.as_str());

    // The RSVP is durable at this point; a confirmation failure is logged only.
    if let Err(e) = state.notifications.send_confirmation(&event, &saved).await {
        warn!("Confirmation send failed for guest {}: {}", saved.id, e);
    }

    Ok(Json(GuestDetailResponse { guest: saved, additional_guests }))
}

/// Token view used by the RSVP page to prefill the form.
pub async fn view_rsvp(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guest = state.guest_repo.find_by_token(&token).await?
        .ok_or(AppError::NotFound("Unknown RSVP token".into()))?;

    let event = state.event_repo.find_by_id(&guest.event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let additional_guests = state.guest_repo.list_additional_guests(&guest.id).await?;

    Ok(Json(RsvpPageResponse {
        guest: GuestDetailResponse { guest, additional_guests },
        event: EventDetailResponse::from_event(event),
    }))
}

/// One-click status change from a notification link. Carries no party
/// details, so the additional guest set is rewritten per the new status
/// (empty for a bare quick response).
pub async fn quick_rsvp(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Query(params): Query<QuickRsvpParams>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();

    let mut guest = state.guest_repo.find_by_token(&token).await?
        .ok_or(AppError::NotFound("Unknown RSVP token".into()))?;

    let event = state.event_repo.find_by_id(&guest.event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    rsvp::ensure_rsvp_open(&event, now)?;

    if params.status == GuestStatus::Attending {
        guest_limit::check(event.max_guests_per_invitee, 0, guest.max_guests)
            .map_err(AppError::CapacityExceeded)?;
    }

    rsvp::apply_status(&mut guest, params.status, now);
    let saved = state.guest_repo.update(&guest).await?;
    state.guest_repo.replace_additional_guests(&saved.id, &[]).await?;

    info!("Quick RSVP: guest {} -> {}", saved.id, saved.status.as_str());

    if let Err(e) = state.notifications.send_confirmation(&event, &saved).await {
        warn!("Confirmation send failed for guest {}: {}", saved.id, e);
    }

    let target = format!("{}/rsvp/{}?responded=1", state.config.frontend_url, saved.token);
    Ok(Redirect::to(&target))
}
