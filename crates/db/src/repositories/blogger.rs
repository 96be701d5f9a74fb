//! Blogger repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::bloggers;

/// Error types for blogger operations.
#[derive(Debug, thiserror::Error)]
pub enum BloggerError {
    /// Blogger not found.
    #[error("Blogger not found: {0}")]
    NotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a blogger.
#[derive(Debug, Clone)]
pub struct CreateBloggerInput {
    /// Display name (required).
    pub name: String,
    /// Publishing platform.
    pub platform: Option<String>,
    /// Channel or profile link.
    pub link: Option<String>,
    /// Contact link for outreach.
    pub contact_link: Option<String>,
    /// Advertising-register details.
    pub rkn_info: Option<String>,
    /// Telegram handle.
    pub telegram: Option<String>,
}

/// Input for updating a blogger.
#[derive(Debug, Clone, Default)]
pub struct UpdateBloggerInput {
    /// Display name.
    pub name: Option<String>,
    /// Publishing platform.
    pub platform: Option<Option<String>>,
    /// Channel or profile link.
    pub link: Option<Option<String>>,
    /// Contact link for outreach.
    pub contact_link: Option<Option<String>>,
    /// Advertising-register details.
    pub rkn_info: Option<Option<String>>,
    /// Telegram handle.
    pub telegram: Option<Option<String>>,
}

/// Filter options for listing bloggers.
#[derive(Debug, Clone, Default)]
pub struct BloggerFilter {
    /// Case-insensitive substring match on name.
    pub name_contains: Option<String>,
    /// Exact match on platform.
    pub platform: Option<String>,
}

/// Blogger repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BloggerRepository {
    db: DatabaseConnection,
}

impl BloggerRepository {
    /// Creates a new blogger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new blogger.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateBloggerInput) -> Result<bloggers::Model, BloggerError> {
        let model = bloggers::ActiveModel {
            name: Set(input.name),
            platform: Set(input.platform),
            link: Set(input.link),
            contact_link: Set(input.contact_link),
            rkn_info: Set(input.rkn_info),
            telegram: Set(input.telegram),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Finds a blogger by id.
    ///
    /// # Errors
    ///
    /// Returns `BloggerError::NotFound` if no row matches.
    pub async fn find_by_id(&self, id: i32) -> Result<bloggers::Model, BloggerError> {
        bloggers::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(BloggerError::NotFound(id))
    }

    /// Lists bloggers ordered by name, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: &BloggerFilter) -> Result<Vec<bloggers::Model>, BloggerError> {
        let mut query = bloggers::Entity::find();

        if let Some(name) = &filter.name_contains {
            query = query.filter(bloggers::Column::Name.contains(name));
        }
        if let Some(platform) = &filter.platform {
            query = query.filter(bloggers::Column::Platform.eq(platform));
        }

        Ok(query
            .order_by_asc(bloggers::Column::Name)
            .order_by_asc(bloggers::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Updates a blogger.
    ///
    /// # Errors
    ///
    /// Returns `BloggerError::NotFound` if no row matches.
    pub async fn update(
        &self,
        id: i32,
        input: UpdateBloggerInput,
    ) -> Result<bloggers::Model, BloggerError> {
        let existing = self.find_by_id(id).await?;
        let mut model: bloggers::ActiveModel = existing.into();

        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(platform) = input.platform {
            model.platform = Set(platform);
        }
        if let Some(link) = input.link {
            model.link = Set(link);
        }
        if let Some(contact_link) = input.contact_link {
            model.contact_link = Set(contact_link);
        }
        if let Some(rkn_info) = input.rkn_info {
            model.rkn_info = Set(rkn_info);
        }
        if let Some(telegram) = input.telegram {
            model.telegram = Set(telegram);
        }

        Ok(model.update(&self.db).await?)
    }

    /// Deletes a blogger.
    ///
    /// Orders referencing the blogger are detached, not deleted; they keep
    /// working with an unresolved blogger reference.
    ///
    /// # Errors
    ///
    /// Returns `BloggerError::NotFound` if no row matches.
    pub async fn delete(&self, id: i32) -> Result<(), BloggerError> {
        let result = bloggers::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(BloggerError::NotFound(id));
        }
        Ok(())
    }
}
