use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::BulkActionRequest;
use crate::api::extractors::host::HostKey;
use crate::domain::services::bulk::run_bulk_action;
use crate::error::AppError;
use crate::state::AppState;

pub async fn bulk_guest_action(
    State(state): State<Arc<AppState>>,
    _host: HostKey,
    Path(event_id): Path<String>,
    Json(payload): Json<BulkActionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let outcome = run_bulk_action(
        &state.guest_repo,
        &state.notifications,
        &event,
        payload.action,
        &payload.guest_ids,
        payload.status,
        Utc::now(),
    ).await?;

    info!(
        "Bulk action on event {}: {} ok, {} failed",
        event.id, outcome.success_count, outcome.failed_count
    );

    // Partial failure is reported, never hidden behind a plain 200.
    let status = if outcome.failed_count > 0 {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome)))
}
