use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_user::get_user;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::register::register;
use super::middleware::authenticate as auth_gate;
use super::middleware::PublicRoutes;
use crate::domain::auth::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub public_routes: Arc<PublicRoutes>,
}

impl AppState {
    pub fn new(
        auth_service: Arc<dyn AuthServicePort>,
        authenticator: Arc<Authenticator>,
        public_routes: PublicRoutes,
    ) -> Self {
        Self {
            auth_service,
            authenticator,
            public_routes: Arc::new(public_routes),
        }
    }
}

/// Routes served by this crate, before any application routes are merged in.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/api/v1/users/:user_id", get(get_user))
}

/// Build the HTTP application.
///
/// `api_routes` are merged next to the auth endpoints and sit behind the same
/// gate. Every request, public or not, passes through the gate, which lets
/// allow-listed requests through and demands a bearer token from the rest.
pub fn create_router(
    state: AppState,
    api_routes: Router<AppState>,
    request_timeout: Duration,
) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    auth_routes()
        .merge(api_routes)
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

/// Resolve once `signal` fires, for use with graceful shutdown.
///
/// If the signal cannot be installed the server keeps running instead of
/// shutting down straight away.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
