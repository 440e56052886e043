use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Errors produced by login, registration and logout.
///
/// Credential failures collapse into `InvalidCredentials` so callers cannot
/// tell an unknown username from a wrong password.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists: {0}")]
    UserExists(String),

    #[error("Email already exists: {0}")]
    EmailExists(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(PasswordError),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Failed to persist session: {0}")]
    SessionPersistFailure(String),

    #[error("Failed to delete session: {0}")]
    SessionDeleteFailure(String),

    #[error("Failed to purge expired sessions: {0}")]
    SessionPurgeFailure(String),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("User store error: {0}")]
    User(#[from] UserError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
