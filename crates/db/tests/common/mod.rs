//! Shared test harness: in-memory SQLite with migrations applied.

use adboard_db::migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// Opens a fresh in-memory database and runs all migrations.
///
/// A single pooled connection keeps every query on the same in-memory
/// database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("should connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("should run migrations");
    db
}
