use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;

use super::handlers::ApiError;
use crate::domain::session::models::SessionId;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Authenticated caller, attached to the request by [`authenticate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub expires_at: DateTime<Utc>,
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .ok_or_else(ApiError::unauthorized)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathPattern {
    Exact(String),
    Prefix(String),
}

impl PathPattern {
    fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix('*') {
            Some(prefix) => PathPattern::Prefix(prefix.to_string()),
            None => PathPattern::Exact(pattern.to_string()),
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(p) => path == p,
            PathPattern::Prefix(p) => path.starts_with(p.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PublicRoute {
    method: Method,
    pattern: PathPattern,
}

/// Requests that pass the gate without a token.
///
/// A pattern ending in `*` matches every path with that prefix; any other
/// pattern must match the path exactly. The method must always match.
#[derive(Debug, Clone, Default)]
pub struct PublicRoutes {
    routes: Vec<PublicRoute>,
}

impl PublicRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(mut self, method: Method, pattern: &str) -> Self {
        self.routes.push(PublicRoute {
            method,
            pattern: PathPattern::parse(pattern),
        });
        self
    }

    pub fn is_public(&self, method: &Method, path: &str) -> bool {
        self.routes
            .iter()
            .any(|route| route.method == *method && route.pattern.matches(path))
    }

    /// Login, registration and read-only blog browsing.
    ///
    /// Individual user profiles include the email address and are not listed.
    pub fn blog_defaults() -> Self {
        Self::new()
            .allow(Method::POST, "/auth/login")
            .allow(Method::POST, "/auth/register")
            .allow(Method::GET, "/api/v1/posts")
            .allow(Method::GET, "/api/v1/posts/*")
            .allow(Method::GET, "/api/v1/users")
    }
}

/// Gate in front of every route: public requests pass untouched, all others
/// need a valid bearer token and get an [`Identity`] attached.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state
        .public_routes
        .is_public(req.method(), req.uri().path())
    {
        return Ok(next.run(req).await);
    }

    let token = bearer_token(&req).ok_or_else(|| {
        tracing::warn!(
            method = %req.method(),
            path = %req.uri().path(),
            "Missing or malformed Authorization header"
        );
        ApiError::unauthorized()
    })?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, path = %req.uri().path(), "Token validation failed");
        ApiError::unauthorized()
    })?;

    let expires_at = claims.expires_at().ok_or_else(|| {
        tracing::warn!(exp = claims.exp, "Token expiry out of range");
        ApiError::unauthorized()
    })?;

    let identity = Identity {
        user_id: UserId(claims.user_id),
        session_id: SessionId(claims.session_id),
        expires_at,
    };

    tracing::debug!(user_id = %identity.user_id, session_id = %identity.session_id, "Request authenticated");

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// `Authorization: Bearer <token>`, split on whitespace into exactly two parts.
fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}
