use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by a session bearer token.
///
/// Binds a user to the server-side session that was opened at login.
/// The token is self-contained: signature and `exp` are enough to trust it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Authenticated user identifier
    pub user_id: Uuid,

    /// Session identifier, used for lookup and revocation
    pub session_id: Uuid,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl SessionClaims {
    /// Create claims expiring at a fixed instant.
    ///
    /// # Arguments
    /// * `user_id` - Authenticated user identifier
    /// * `session_id` - Session the token belongs to
    /// * `expires_at` - Instant after which the token is rejected
    pub fn new(user_id: Uuid, session_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            session_id,
            exp: expires_at.timestamp(),
            iat: Some(Utc::now().timestamp()),
        }
    }

    /// Create claims valid for `ttl` from now.
    ///
    /// A negative `ttl` yields claims that are already expired.
    pub fn for_session(user_id: Uuid, session_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            session_id,
            exp: (now + ttl).timestamp(),
            iat: Some(now.timestamp()),
        }
    }

    /// Expiration as a timestamp, if representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_session() {
        let user_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();

        let claims = SessionClaims::for_session(user_id, session_id, Duration::hours(24));

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.session_id, session_id);

        let iat = claims.iat.unwrap();
        assert_eq!(claims.exp - iat, 24 * 60 * 60); // 24 hours
    }

    #[test]
    fn test_new_uses_given_expiry() {
        let expires_at = DateTime::from_timestamp(1_900_000_000, 0).unwrap();

        let claims = SessionClaims::new(Uuid::new_v4(), Uuid::new_v4(), expires_at);

        assert_eq!(claims.exp, 1_900_000_000);
        assert_eq!(claims.expires_at(), Some(expires_at));
    }

    #[test]
    fn test_wire_field_names() {
        let user_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let claims = SessionClaims::for_session(user_id, session_id, Duration::hours(1));

        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["user_id"], user_id.to_string());
        assert_eq!(value["session_id"], session_id.to_string());
        assert_eq!(value["exp"], claims.exp);
    }
}
