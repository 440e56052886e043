use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::PasswordError;
use auth::SessionClaims;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::LoginCredentials;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionId;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for authentication.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// bcrypt work runs on the blocking pool so it never stalls other requests.
pub struct AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    user_repository: Arc<UR>,
    session_repository: Arc<SR>,
    authenticator: Arc<Authenticator>,
}

impl<UR, SR> AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_repository` - User lookup and creation
    /// * `session_repository` - Session persistence
    /// * `authenticator` - Password hasher and token codec
    pub fn new(
        user_repository: Arc<UR>,
        session_repository: Arc<SR>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, SR> AuthServicePort for AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    async fn authenticate(&self, credentials: LoginCredentials) -> Result<AccessToken, AuthError> {
        let LoginCredentials { username, password } = credentials;

        let user = self
            .user_repository
            .find_by_username(&username)
            .await
            .map_err(|e| {
                tracing::error!(username = %username, error = %e, "Failed to look up user");
                AuthError::from(e)
            })?;

        let Some(user) = user else {
            tracing::warn!(username = %username, "Login attempt for unknown username");
            // Same bcrypt work as a wrong password, so timing does not reveal the miss.
            let authenticator = Arc::clone(&self.authenticator);
            tokio::task::spawn_blocking(move || authenticator.reject_unknown_user(&password))
                .await
                .map_err(|e| {
                    AuthError::Unknown(format!("Password verification task failed: {}", e))
                })?;
            return Err(AuthError::InvalidCredentials);
        };

        let session_id = SessionId::new();
        let issued_at = Utc::now();
        let claims = SessionClaims::new(user.id.0, session_id.0, Session::expiry_for(issued_at));

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &claims)
        })
        .await
        .map_err(|e| AuthError::Unknown(format!("Password verification task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::warn!(user_id = %user.id, "Login attempt with invalid password");
                AuthError::InvalidCredentials
            }
            AuthenticationError::PasswordError(err) => {
                tracing::error!(user_id = %user.id, error = %err, "Password verification failed");
                AuthError::Password(err)
            }
            AuthenticationError::JwtError(err) => {
                tracing::error!(user_id = %user.id, error = %err, "Token generation failed");
                AuthError::Token(err)
            }
        })?;

        // The token leaves this function only if its session was stored.
        let session = Session::open(session_id, user.id, result.access_token, issued_at);
        let session = self
            .session_repository
            .create(session)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Failed to create session");
                AuthError::SessionPersistFailure(e.to_string())
            })?;

        tracing::info!(
            user_id = %user.id,
            session_id = %session.session_id,
            expires_at = %session.expires_at,
            "User logged in"
        );

        Ok(AccessToken::new(session.token))
    }

    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
        let RegisterUserCommand {
            username,
            email,
            password,
        } = command;

        if self
            .user_repository
            .find_by_username(&username)
            .await?
            .is_some()
        {
            tracing::warn!(username = %username, "Registration rejected, username taken");
            return Err(AuthError::UserExists(username.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
                .await
                .map_err(|e| AuthError::Unknown(format!("Password hashing task failed: {}", e)))?
                .map_err(|e| match e {
                    err @ PasswordError::TooLong { .. } => AuthError::InvalidPassword(err),
                    err => {
                        tracing::error!(error = %err, "Failed to hash password");
                        AuthError::Password(err)
                    }
                })?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username,
            email,
            password_hash,
            role: Role::User,
            created_at: now,
            updated_at: now,
        };

        let created_user = self
            .user_repository
            .create(user)
            .await
            .map_err(|e| match e {
                UserError::UsernameAlreadyExists(name) => AuthError::UserExists(name),
                UserError::EmailAlreadyExists(email) => AuthError::EmailExists(email),
                other => {
                    tracing::error!(error = %other, "Failed to create user");
                    AuthError::User(other)
                }
            })?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn logout(&self, session_id: &SessionId) -> Result<(), AuthError> {
        let session = self
            .session_repository
            .find_by_session_id(session_id)
            .await
            .map_err(|e| {
                tracing::error!(session_id = %session_id, error = %e, "Failed to get session");
                AuthError::SessionDeleteFailure(e.to_string())
            })?;

        let Some(session) = session else {
            tracing::warn!(
                session_id = %session_id,
                "Session not found, considering it already logged out"
            );
            return Ok(());
        };

        if !session.is_live(Utc::now()) {
            tracing::debug!(session_id = %session_id, "Logging out of an already expired session");
        }

        self.session_repository
            .delete(&session.session_id)
            .await
            .map_err(|e| {
                tracing::error!(session_id = %session_id, error = %e, "Failed to delete session");
                AuthError::SessionDeleteFailure(e.to_string())
            })?;

        tracing::info!(
            user_id = %session.user_id,
            session_id = %session.session_id,
            "User logged out"
        );

        Ok(())
    }

    async fn get_user(&self, user_id: &UserId) -> Result<User, AuthError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound(user_id.to_string()))
    }

    async fn purge_expired_sessions(&self) -> Result<u64, AuthError> {
        let purged = self
            .session_repository
            .delete_expired(Utc::now())
            .await
            .map_err(|e| AuthError::SessionPurgeFailure(e.to_string()))?;

        if purged > 0 {
            tracing::info!(purged, "Expired sessions purged");
        }

        Ok(purged)
    }
}
