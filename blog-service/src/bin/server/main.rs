use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::PasswordHasher;
use axum::Router;
use blog_service::config::Config;
use blog_service::domain::auth::ports::AuthServicePort;
use blog_service::domain::auth::service::AuthService;
use blog_service::inbound::http::middleware::PublicRoutes;
use blog_service::inbound::http::router::create_router;
use blog_service::inbound::http::router::shutdown_on;
use blog_service::inbound::http::router::AppState;
use blog_service::outbound::repositories::PostgresSessionRepository;
use blog_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        password_cost = config.password.cost,
        purge_interval_secs = config.session.purge_interval_secs,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        PasswordHasher::with_cost(config.password.cost),
    ));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let session_repository = Arc::new(PostgresSessionRepository::new(pg_pool));

    let auth_service: Arc<dyn AuthServicePort> = Arc::new(AuthService::new(
        user_repository,
        session_repository,
        Arc::clone(&authenticator),
    ));

    if config.session.purge_interval_secs > 0 {
        spawn_session_purge(
            Arc::clone(&auth_service),
            Duration::from_secs(config.session.purge_interval_secs),
        );
    }

    let state = AppState::new(
        auth_service,
        authenticator,
        PublicRoutes::blog_defaults(),
    );

    // Blog content routes mount here; the gate already covers them.
    let api_routes = Router::new();

    let http_application = create_router(state, api_routes, config.server.request_timeout());

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn spawn_session_purge(auth_service: Arc<dyn AuthServicePort>, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match auth_service.purge_expired_sessions().await {
                Ok(removed) => tracing::debug!(removed, "Session purge completed"),
                Err(e) => tracing::error!(error = %e, "Session purge failed"),
            }
        }
    });
}
