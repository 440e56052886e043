use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionId;

/// Durable mapping from session identity to session record.
///
/// Every operation touches exactly one row, except `delete_expired`.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Persist a new session.
    ///
    /// # Arguments
    /// * `session` - Session opened at login
    ///
    /// # Returns
    /// Stored session
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, session: Session) -> Result<Session, SessionError>;

    /// Retrieve a session by its session identifier.
    ///
    /// # Returns
    /// Optional session (None once logged out)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_session_id(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Session>, SessionError>;

    /// Rotate the token and expiry of an existing session.
    ///
    /// # Errors
    /// * `NotFound` - Session no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, session: Session) -> Result<Session, SessionError>;

    /// Remove a session. Deleting an absent session is not an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, session_id: &SessionId) -> Result<(), SessionError>;

    /// Remove every session that expired at or before `now`.
    ///
    /// # Returns
    /// Number of removed sessions
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionError>;
}
