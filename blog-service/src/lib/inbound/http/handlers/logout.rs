use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::Identity;
use crate::inbound::http::router::AppState;

/// Revoke the caller's session.
///
/// Resolves the session in the store rather than trusting the token alone,
/// so repeating the call after a successful logout is harmless.
pub async fn logout(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    tracing::info!(session_id = %identity.session_id, "Attempting to logout");

    state
        .auth_service
        .logout(&identity.session_id)
        .await
        .map_err(|e| {
            tracing::error!(session_id = %identity.session_id, error = %e, "Failed to logout");
            ApiError::InternalServerError("Failed to logout".to_string())
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            message: "Logged out successfully".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
