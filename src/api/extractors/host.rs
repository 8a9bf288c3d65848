use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use std::sync::Arc;
use crate::state::AppState;

/// Marker extractor for privileged (host/admin) routes. Checks the static
/// host API key; real identity management is a collaborator outside this
/// service.
pub struct HostKey;

impl FromRequestParts<Arc<AppState>> for HostKey {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let key = header.strip_prefix("Bearer ").ok_or(StatusCode::UNAUTHORIZED)?;

        if key == state.config.host_api_key {
            Ok(HostKey)
        } else {
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
