//! Adboard API Server
//!
//! Main entry point for the Adboard backend service.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adboard_api::{AppState, create_router};
use adboard_core::storage::StorageService;
use adboard_db::{connect, migration::Migrator};
use adboard_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database and bring the schema up to date
    let db = connect(&config.database.url, config.database.max_connections).await?;
    Migrator::up(&db, None).await?;
    info!("Connected to database");

    // Create storage service for document files
    let storage = StorageService::from_root(config.storage.root.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {e}"))?;
    info!(root = %config.storage.root, "Document storage configured");

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        storage: Arc::new(storage),
        auth: Arc::new(config.auth.clone()),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
