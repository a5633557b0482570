use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::SecretKey;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::config::DatabaseConfig;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().context("Failed to load configuration")?;

    let storage = match config.database.url {
        Some(_) => "postgresql",
        None => "memory",
    };
    tracing::info!(
        storage,
        http_port = config.server.http_port,
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let secret = SecretKey::new(config.jwt.secret.as_bytes())
        .context("jwt.secret must be set (USER_SERVICE_JWT__SECRET)")?;
    if secret.is_weak() {
        tracing::warn!(
            key_length = secret.len(),
            "Token signing secret is shorter than 32 bytes"
        );
    }

    let password_hasher = PasswordHasher::with_config(config.password.clone())
        .context("Invalid password hashing configuration")?;
    let token_ttl = Duration::try_hours(config.jwt.expiration_hours)
        .context("jwt.expiration_hours is out of range")?;
    let authenticator = Arc::new(
        Authenticator::new(secret)
            .with_password_hasher(password_hasher)
            .with_token_ttl(token_ttl)
            .context("jwt.expiration_hours must be a positive number of hours")?,
    );

    let user_service = build_user_service(&config.database, Arc::clone(&authenticator)).await?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, authenticator);
    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}

/// Wire the user service to PostgreSQL when a URL is configured, else to memory.
async fn build_user_service(
    database: &DatabaseConfig,
    authenticator: Arc<Authenticator>,
) -> Result<Arc<dyn UserServicePort>, anyhow::Error> {
    match &database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
            Ok(Arc::new(UserService::new(user_repository, authenticator)))
        }
        None => {
            tracing::warn!("No database URL configured; users are kept in memory");
            let user_repository = Arc::new(InMemoryUserRepository::new());
            Ok(Arc::new(UserService::new(user_repository, authenticator)))
        }
    }
}
