use axum::{extract::{State, Path}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::{CreateGuestRequest, UpdateGuestRequest};
use crate::api::dtos::responses::GuestDetailResponse;
use crate::api::extractors::host::HostKey;
use crate::domain::models::guest::{Guest, NewGuestParams};
use crate::error::AppError;
use crate::state::AppState;

fn validate_guest_cap(cap: Option<i64>) -> Result<(), AppError> {
    if let Some(max) = cap {
        if max < 1 {
            return Err(AppError::Validation("max_guests must be at least 1".into()));
        }
    }
    Ok(())
}

pub async fn create_guest(
    State(state): State<Arc<AppState>>,
    _host: HostKey,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("Guest email must not be empty".into()));
    }
    validate_guest_cap(payload.max_guests)?;

    let guest = Guest::new(NewGuestParams {
        event_id: event.id.clone(),
        email: payload.email,
        name: payload.name,
        phone: payload.phone,
        notify_by_email: payload.notify_by_email.unwrap_or(true),
        notify_by_sms: payload.notify_by_sms.unwrap_or(false),
        max_guests: payload.max_guests,
    });

    // Unique (event_id, email) violations surface as 409 via the error layer.
    let created = state.guest_repo.create(&guest).await?;
    info!("Created guest {} for event {}", created.id, event.id);

    if payload.send_invitation.unwrap_or(false) {
        // The guest row is already durable; a failed send must not undo it.
        if let Err(e) = state.notifications.send_invitation(&event, &created).await {
            warn!("Invitation send failed for guest {}: {}", created.id, e);
        }
    }

    Ok(Json(GuestDetailResponse { guest: created, additional_guests: Vec::new() }))
}

pub async fn list_guests(
    State(state): State<Arc<AppState>>,
    _host: HostKey,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let guests = state.guest_repo.list_by_event(&event.id).await?;
    let mut detailed = Vec::with_capacity(guests.len());
    for guest in guests {
        let additional_guests = state.guest_repo.list_additional_guests(&guest.id).await?;
        detailed.push(GuestDetailResponse { guest, additional_guests });
    }
    Ok(Json(detailed))
}

pub async fn update_guest(
    State(state): State<Arc<AppState>>,
    _host: HostKey,
    Path((event_id, guest_id)): Path<(String, String)>,
    Json(payload): Json<UpdateGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut guest = state.guest_repo.find_by_id(&event_id, &guest_id).await?
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    if let Some(name) = payload.name { guest.name = Some(name); }
    if let Some(phone) = payload.phone { guest.phone = Some(phone); }
    if let Some(flag) = payload.notify_by_email { guest.notify_by_email = flag; }
    if let Some(flag) = payload.notify_by_sms { guest.notify_by_sms = flag; }
    if let Some(cap) = payload.max_guests {
        validate_guest_cap(Some(cap))?;
        guest.max_guests = Some(cap);
    }

    let updated = state.guest_repo.update(&guest).await?;
    let additional_guests = state.guest_repo.list_additional_guests(&updated.id).await?;
    info!("Updated guest: {}", updated.id);
    Ok(Json(GuestDetailResponse { guest: updated, additional_guests }))
}

pub async fn delete_guest(
    State(state): State<Arc<AppState>>,
    _host: HostKey,
    Path((event_id, guest_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.guest_repo.delete(&event_id, &guest_id).await?;
    info!("Deleted guest: {}", guest_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
