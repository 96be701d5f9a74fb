//! Advertiser repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::advertisers;

/// Error types for advertiser operations.
#[derive(Debug, thiserror::Error)]
pub enum AdvertiserError {
    /// Advertiser not found.
    #[error("Advertiser not found: {0}")]
    NotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an advertiser.
#[derive(Debug, Clone)]
pub struct CreateAdvertiserInput {
    /// Company or contact name (required).
    pub name: String,
    /// Telegram handle.
    pub telegram: Option<String>,
}

/// Input for updating an advertiser.
#[derive(Debug, Clone, Default)]
pub struct UpdateAdvertiserInput {
    /// Company or contact name.
    pub name: Option<String>,
    /// Telegram handle.
    pub telegram: Option<Option<String>>,
}

/// Filter options for listing advertisers.
#[derive(Debug, Clone, Default)]
pub struct AdvertiserFilter {
    /// Case-insensitive substring match on name.
    pub name_contains: Option<String>,
}

/// Advertiser repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AdvertiserRepository {
    db: DatabaseConnection,
}

impl AdvertiserRepository {
    /// Creates a new advertiser repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new advertiser.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateAdvertiserInput,
    ) -> Result<advertisers::Model, AdvertiserError> {
        let model = advertisers::ActiveModel {
            name: Set(input.name),
            telegram: Set(input.telegram),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Finds an advertiser by id.
    ///
    /// # Errors
    ///
    /// Returns `AdvertiserError::NotFound` if no row matches.
    pub async fn find_by_id(&self, id: i32) -> Result<advertisers::Model, AdvertiserError> {
        advertisers::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AdvertiserError::NotFound(id))
    }

    /// Lists advertisers ordered by name, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &AdvertiserFilter,
    ) -> Result<Vec<advertisers::Model>, AdvertiserError> {
        let mut query = advertisers::Entity::find();

        if let Some(name) = &filter.name_contains {
            query = query.filter(advertisers::Column::Name.contains(name));
        }

        Ok(query
            .order_by_asc(advertisers::Column::Name)
            .order_by_asc(advertisers::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Updates an advertiser.
    ///
    /// # Errors
    ///
    /// Returns `AdvertiserError::NotFound` if no row matches.
    pub async fn update(
        &self,
        id: i32,
        input: UpdateAdvertiserInput,
    ) -> Result<advertisers::Model, AdvertiserError> {
        let existing = self.find_by_id(id).await?;
        let mut model: advertisers::ActiveModel = existing.into();

        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(telegram) = input.telegram {
            model.telegram = Set(telegram);
        }

        Ok(model.update(&self.db).await?)
    }

    /// Deletes an advertiser.
    ///
    /// Projects and orders referencing the advertiser are detached, not
    /// deleted.
    ///
    /// # Errors
    ///
    /// Returns `AdvertiserError::NotFound` if no row matches.
    pub async fn delete(&self, id: i32) -> Result<(), AdvertiserError> {
        let result = advertisers::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AdvertiserError::NotFound(id));
        }
        Ok(())
    }
}
