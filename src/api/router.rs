use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{bulk, event, guest, health, reminder, rsvp};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Events (host)
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))
        .route("/api/v1/events/{event_id}/reminders", put(event::update_reminder_schedule))

        // Guest list (host)
        .route("/api/v1/events/{event_id}/guests", post(guest::create_guest).get(guest::list_guests))
        .route("/api/v1/events/{event_id}/guests/{guest_id}", put(guest::update_guest).delete(guest::delete_guest))
        .route("/api/v1/events/{event_id}/guests/bulk", post(bulk::bulk_guest_action))

        // Public RSVP flow
        .route("/api/v1/events/{event_id}/rsvp", post(rsvp::submit_rsvp))
        .route("/api/v1/rsvp/{token}", get(rsvp::view_rsvp))
        .route("/api/v1/rsvp/{token}/quick", get(rsvp::quick_rsvp))

        // Scheduler entry point (cron)
        .route("/api/v1/internal/reminders/run", post(reminder::run_reminder_pass))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
