use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::LoginCredentials;
use crate::inbound::http::router::AppState;
use crate::user::models::Username;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .authenticate(body.try_into_credentials()?)
        .await
        .map_err(ApiError::from)
        .map(|token| {
            ApiSuccess::new(
                StatusCode::OK,
                LoginResponseData {
                    token: token.into_inner(),
                },
            )
        })
}

/// HTTP request body for logging in (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

impl LoginRequestBody {
    fn try_into_credentials(self) -> Result<LoginCredentials, ApiError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ApiError::BadRequest(
                "username and password are required".to_string(),
            ));
        }

        // A name that could never be registered cannot log in either;
        // report it like any other credential failure.
        let username = Username::new(self.username)
            .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        Ok(LoginCredentials::new(username, self.password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
