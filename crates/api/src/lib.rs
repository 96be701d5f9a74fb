//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Session-cookie authentication middleware
//! - Request DTOs and response types

pub mod middleware;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use adboard_core::storage::StorageService;
use adboard_shared::config::AuthConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Storage service for document files.
    pub storage: Arc<StorageService>,
    /// Shared-password gate configuration.
    pub auth: Arc<AuthConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    use adboard_core::storage::StorageService;
    use adboard_db::migration::Migrator;
    use adboard_shared::config::AuthConfig;

    use crate::AppState;

    /// Shared test password.
    pub const TEST_PASSWORD: &str = "agency-secret";

    /// Builds an `AppState` over a fresh in-memory database and a throwaway
    /// upload directory.
    pub async fn test_state() -> AppState {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        let db = Database::connect(options)
            .await
            .expect("should connect to in-memory sqlite");
        Migrator::up(&db, None).await.expect("should run migrations");

        let upload_dir =
            std::env::temp_dir().join(format!("adboard-api-test-{}", uuid::Uuid::new_v4()));
        let storage = StorageService::from_root(upload_dir).expect("should create storage");

        AppState {
            db: Arc::new(db),
            storage: Arc::new(storage),
            auth: Arc::new(AuthConfig {
                password: TEST_PASSWORD.to_string(),
                session_ttl_hours: 1,
            }),
        }
    }
}
