use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yeram::{
    api,
    auth::AdminAuth,
    config::{Settings, StorageBackend, DEFAULT_ADMIN_PASSWORD},
    repository::Repositories,
    service::ServiceContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before reading configuration
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yeram=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;

    if settings.admin.password == DEFAULT_ADMIN_PASSWORD {
        tracing::warn!("Admin password is the built-in default; set YERAM__ADMIN__PASSWORD");
    }

    tracing::info!("Starting server on {}:{}", settings.server.host, settings.server.port);

    // Initialize storage
    let backend = settings.storage_backend();
    match &backend {
        StorageBackend::Sqlite { .. } => tracing::info!("Using SQLite storage"),
        StorageBackend::Memory => tracing::warn!("Using in-memory storage; content is lost on restart"),
        StorageBackend::File { path } => tracing::info!("Using file storage at {}", path),
    }
    let repositories = Repositories::open(&backend, settings.storage.max_connections).await?;

    let admin_auth = Arc::new(AdminAuth::new(
        settings.admin.password.clone(),
        settings.admin.session_hours,
    ));

    let service_context = Arc::new(ServiceContext::new(repositories, admin_auth));

    let app = api::create_app(service_context, Arc::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", settings.server.host, settings.server.port)
    ).await?;

    tracing::info!("Server listening on http://{}:{}", settings.server.host, settings.server.port);

    axum::serve(listener, app).await?;

    Ok(())
}
