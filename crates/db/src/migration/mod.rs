//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration.

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_initial;
mod m20250301_000002_sessions;
mod m20250607_000003_drop_unique_names;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_initial::Migration),
            Box::new(m20250301_000002_sessions::Migration),
            Box::new(m20250607_000003_drop_unique_names::Migration),
        ]
    }
}
