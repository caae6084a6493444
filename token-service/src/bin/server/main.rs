use std::sync::Arc;

use auth::CredentialManager;
use sqlx::postgres::PgPoolOptions;
use token_service::config::Config;
use token_service::domain::authentication::service::AuthService;
use token_service::inbound::http::router::create_router;
use token_service::outbound::repositories::PostgresRefreshTokenRepository;
use token_service::outbound::repositories::PostgresUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "token_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "token-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_lifetime_minutes = config.jwt.access_token_lifetime_minutes,
        operation_timeout_ms = config.service.operation_timeout_ms,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let credentials = Arc::new(CredentialManager::new(&config.credential_settings())?);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let token_repository = Arc::new(PostgresRefreshTokenRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_repository,
        credentials,
        config.operation_timeout(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
