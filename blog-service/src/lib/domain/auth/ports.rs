use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::LoginCredentials;
use crate::domain::session::models::SessionId;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for session-based authentication use cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials, open a session and issue its token.
    ///
    /// The token is returned only once the session is stored.
    ///
    /// # Arguments
    /// * `credentials` - Username and plaintext password
    ///
    /// # Returns
    /// Bearer token bound to the new session
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `SessionPersistFailure` - Session could not be stored
    /// * `Password` / `Token` / `User` - Infrastructure failure
    async fn authenticate(&self, credentials: LoginCredentials) -> Result<AccessToken, AuthError>;

    /// Create a new user account. Does not log the user in.
    ///
    /// # Arguments
    /// * `command` - Validated username, email and password
    ///
    /// # Returns
    /// Created user
    ///
    /// # Errors
    /// * `UserExists` - Username is already taken
    /// * `EmailExists` - Email is already registered
    /// * `InvalidPassword` - Password rejected by the hasher
    /// * `User` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError>;

    /// Terminate a session. Logging out of a missing session succeeds.
    ///
    /// # Errors
    /// * `SessionDeleteFailure` - Session store failed
    async fn logout(&self, session_id: &SessionId) -> Result<(), AuthError>;

    /// Look up a user by id.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this id
    /// * `User` - Database operation failed
    async fn get_user(&self, user_id: &UserId) -> Result<User, AuthError>;

    /// Delete sessions whose expiry has passed.
    ///
    /// # Returns
    /// Number of removed sessions
    ///
    /// # Errors
    /// * `SessionPurgeFailure` - Session store failed
    async fn purge_expired_sessions(&self) -> Result<u64, AuthError>;
}
