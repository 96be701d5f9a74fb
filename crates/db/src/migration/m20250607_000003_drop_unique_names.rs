//! Drops storage-layer name uniqueness for bloggers and advertisers.
//!
//! Duplicate names do occur in practice (re-imports, renamed accounts), so
//! uniqueness moved out of the schema; listing screens de-duplicate at query
//! time instead.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP INDEX IF EXISTS idx_bloggers_name;")
            .await?;
        db.execute_unprepared("DROP INDEX IF EXISTS idx_advertisers_name;")
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("CREATE UNIQUE INDEX idx_bloggers_name ON bloggers(name);")
            .await?;
        db.execute_unprepared("CREATE UNIQUE INDEX idx_advertisers_name ON advertisers(name);")
            .await?;
        Ok(())
    }
}
