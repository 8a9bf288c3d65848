use axum::{extract::{State, Path}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateEventRequest, UpdateEventRequest, UpdateReminderScheduleRequest};
use crate::api::dtos::responses::EventDetailResponse;
use crate::api::extractors::host::HostKey;
use crate::domain::models::event::{Event, NewEventParams};
use crate::domain::services::reminders;
use crate::error::AppError;
use crate::state::AppState;

fn validate_invitee_cap(cap: Option<i64>) -> Result<(), AppError> {
    if let Some(max) = cap {
        if max < 1 {
            return Err(AppError::Validation("max_guests_per_invitee must be at least 1".into()));
        }
    }
    Ok(())
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    _host: HostKey,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Event title must not be empty".into()));
    }
    validate_invitee_cap(payload.max_guests_per_invitee)?;

    let event = Event::new(NewEventParams {
        title: payload.title,
        host_name: payload.host_name,
        location: payload.location,
        starts_at: payload.starts_at,
        rsvp_deadline: payload.rsvp_deadline,
        max_guests_per_invitee: payload.max_guests_per_invitee,
    });

    let created = state.event_repo.create(&event).await?;
    info!("Created event: {}", created.id);
    Ok(Json(EventDetailResponse::from_event(created)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    _host: HostKey,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    let detailed: Vec<EventDetailResponse> = events.into_iter()
        .map(EventDetailResponse::from_event)
        .collect();
    Ok(Json(detailed))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    _host: HostKey,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(Json(EventDetailResponse::from_event(event)))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    _host: HostKey,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(title) = payload.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Event title must not be empty".into()));
        }
        event.title = title;
    }
    if let Some(host_name) = payload.host_name { event.host_name = host_name; }
    if let Some(location) = payload.location { event.location = location; }
    if let Some(starts_at) = payload.starts_at { event.starts_at = starts_at; }
    if let Some(deadline) = payload.rsvp_deadline { event.rsvp_deadline = Some(deadline); }
    if let Some(cap) = payload.max_guests_per_invitee {
        validate_invitee_cap(Some(cap))?;
        event.max_guests_per_invitee = Some(cap);
    }

    let updated = state.event_repo.update(&event).await?;
    info!("Updated event: {}", updated.id);
    Ok(Json(EventDetailResponse::from_event(updated)))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    _host: HostKey,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.delete(&event_id).await?;
    info!("Deleted event: {}", event_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn update_reminder_schedule(
    State(state): State<Arc<AppState>>,
    _host: HostKey,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateReminderScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let validated = reminders::validate(&payload.reminders)
        .map_err(AppError::Validation)?;

    event.reminder_schedule = Some(reminders::serialize(&validated));
    let updated = state.event_repo.update(&event).await?;

    info!("Updated reminder schedule for event {} ({} entries)", updated.id, validated.len());
    Ok(Json(EventDetailResponse::from_event(updated)))
}
