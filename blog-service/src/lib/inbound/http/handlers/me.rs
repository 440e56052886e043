use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::Identity;
use crate::inbound::http::router::AppState;

pub async fn me(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .auth_service
        .get_user(&identity.user_id)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %identity.user_id, error = %e, "Failed to get user information");
            ApiError::InternalServerError("Failed to get user information".to_string())
        })
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
