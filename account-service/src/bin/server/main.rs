use std::sync::Arc;

use account_service::account::service::AuthService;
use account_service::config::Config;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::PostgresAccountRepository;
use auth::PasswordHasher;
use auth::TokenCodec;
use chrono::Duration;
use jsonwebtoken::Algorithm;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    // A short signing secret makes every issued token forgeable; refuse
    // to start rather than run with one.
    anyhow::ensure!(
        config.auth.secret.len() >= 32,
        "auth.secret must be at least 32 bytes, got {}",
        config.auth.secret.len()
    );

    let algorithm: Algorithm = config
        .auth
        .algorithm
        .parse()
        .map_err(|e| anyhow::anyhow!("Unsupported signing algorithm {}: {}", config.auth.algorithm, e))?;

    tracing::info!(
        http_port = config.server.http_port,
        algorithm = %config.auth.algorithm,
        access_token_ttl_minutes = config.auth.access_token_ttl_minutes,
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

    let repository = Arc::new(PostgresAccountRepository::new(pg_pool));
    let auth_service = Arc::new(AuthService::new(
        repository,
        PasswordHasher::new(),
        TokenCodec::with_algorithm(config.auth.secret.as_bytes(), algorithm),
        Duration::minutes(config.auth.access_token_ttl_minutes),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;

    Ok(())
}
