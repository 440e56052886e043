use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::session::errors::SessionIdError;
use crate::domain::user::models::UserId;

/// Lifetime of a session and of the token issued with it.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Session identifier embedded in tokens.
///
/// Distinct from the row id; always generated server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID.
    ///
    /// # Returns
    /// SessionId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, SessionIdError> {
        Uuid::parse_str(s)
            .map(SessionId)
            .map_err(|e| SessionIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Server-side record of a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Fixed session lifetime. Sessions are never extended on use.
    pub fn ttl() -> Duration {
        Duration::hours(SESSION_TTL_HOURS)
    }

    /// Expiry for a session opened at `issued_at`.
    pub fn expiry_for(issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + Self::ttl()
    }

    /// Open a new session for a freshly issued token.
    ///
    /// # Arguments
    /// * `session_id` - Identifier embedded in the token
    /// * `user_id` - Owner of the session
    /// * `token` - Issued bearer token
    /// * `issued_at` - Login instant; expiry is `issued_at + 24h`
    pub fn open(
        session_id: SessionId,
        user_id: UserId,
        token: String,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            user_id,
            token,
            created_at: issued_at,
            updated_at: issued_at,
            expires_at: Self::expiry_for(issued_at),
        }
    }

    /// Whether the session still grants authority at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Replace the token and expiry, keeping the session identity.
    pub fn rotate(&mut self, token: String, expires_at: DateTime<Utc>, now: DateTime<Utc>) {
        self.token = token;
        self.expires_at = expires_at;
        self.updated_at = now;
    }
}
