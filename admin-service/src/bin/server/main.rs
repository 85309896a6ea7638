use std::sync::Arc;

use admin_service::admin::ports::AdminServicePort;
use admin_service::config::Config;
use admin_service::config::RoleStoreKind;
use admin_service::domain::admin::service::AdminService;
use admin_service::inbound::http::router::create_router;
use admin_service::outbound::BackendClient;
use admin_service::outbound::HostedIdentityProvider;
use admin_service::outbound::PostgresRoleRepository;
use admin_service::outbound::RestRoleRepository;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admin_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "admin-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend_url = %config.backend.url,
        http_port = config.server.http_port,
        role_store = ?config.roles.store,
        "Configuration loaded"
    );

    let backend = BackendClient::from_config(&config.backend)?;
    let identity_provider = Arc::new(HostedIdentityProvider::new(backend.clone()));

    let admin_service: Arc<dyn AdminServicePort> = match config.roles.store {
        RoleStoreKind::Rest => {
            let role_repository = Arc::new(RestRoleRepository::new(backend));
            Arc::new(AdminService::new(identity_provider, role_repository))
        }
        RoleStoreKind::Postgres => {
            let database_url = config
                .roles
                .database_url
                .as_deref()
                .context("roles.database_url is required for the postgres role store")?;
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            let role_repository = Arc::new(PostgresRoleRepository::new(pg_pool));
            Arc::new(AdminService::new(identity_provider, role_repository))
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

    let http_application = create_router(admin_service);

    if let Err(e) = axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
