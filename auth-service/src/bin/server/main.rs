use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth_service::config::Config;
use auth_service::domain::user::ports::AuthServicePort;
use auth_service::domain::user::ports::TokenRevocationStore;
use auth_service::domain::user::ports::UserRepository;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use auth_service::outbound::revocation::InMemoryRevocationStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let persistence = if config.database.url.is_some() {
        "postgresql"
    } else {
        "memory"
    };

    tracing::info!(
        http_port = config.server.http_port,
        persistence,
        token_ttl_minutes = config.jwt.expiration_minutes,
        revoke_on_logout = config.jwt.revoke_on_logout,
        "Configuration loaded"
    );

    let password_hasher =
        PasswordHasher::with_memory(config.password.cost, config.password.memory_kib)?;
    let token_issuer = TokenIssuer::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::minutes(config.jwt.expiration_minutes),
    );
    let authenticator = Arc::new(Authenticator::new(password_hasher, token_issuer));

    let revocations: Option<Arc<dyn TokenRevocationStore>> = if config.jwt.revoke_on_logout {
        Some(Arc::new(InMemoryRevocationStore::new()))
    } else {
        None
    };

    let auth_service = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_service(
                Arc::new(PostgresUserRepository::new(pg_pool)),
                authenticator,
                revocations,
            )
        }
        None => {
            tracing::warn!("No database.url configured; users are kept in memory and lost on restart");
            build_service(
                Arc::new(InMemoryUserRepository::new()),
                authenticator,
                revocations,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}

fn build_service<UR: UserRepository>(
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    revocations: Option<Arc<dyn TokenRevocationStore>>,
) -> Arc<dyn AuthServicePort> {
    let service = AuthService::new(repository, authenticator);
    match revocations {
        Some(store) => Arc::new(service.with_revocation_store(store)),
        None => Arc::new(service),
    }
}
