//! Document repository for database operations.
//!
//! Rows only; the backing files live in `adboard_core::storage` and are
//! handled by the caller around these operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{documents, orders, projects};

/// Error types for document operations.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document not found.
    #[error("Document not found: {0}")]
    NotFound(i32),

    /// Selected project does not exist.
    #[error("Project not found: {0}")]
    ProjectNotFound(i32),

    /// Selected order does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a document record.
#[derive(Debug, Clone)]
pub struct CreateDocumentInput {
    /// Display name (required).
    pub name: String,
    /// Sanitized filename the file is stored under.
    pub filename: String,
    /// Document category, e.g. "contract" or "brief".
    pub file_type: Option<String>,
    /// Project the document belongs to.
    pub project_id: Option<i32>,
    /// Order the document belongs to.
    pub order_id: Option<i32>,
    /// Free-text description.
    pub description: Option<String>,
}

/// Filter options for listing documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Exact match on project.
    pub project_id: Option<i32>,
    /// Exact match on order.
    pub order_id: Option<i32>,
}

/// Document repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
}

impl DocumentRepository {
    /// Creates a new document repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new document record.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected project/order does not exist or the
    /// insert fails.
    pub async fn create(&self, input: CreateDocumentInput) -> Result<documents::Model, DocumentError> {
        if let Some(project_id) = input.project_id {
            projects::Entity::find_by_id(project_id)
                .one(&self.db)
                .await?
                .ok_or(DocumentError::ProjectNotFound(project_id))?;
        }
        if let Some(order_id) = input.order_id {
            orders::Entity::find_by_id(order_id)
                .one(&self.db)
                .await?
                .ok_or(DocumentError::OrderNotFound(order_id))?;
        }

        let model = documents::ActiveModel {
            name: Set(input.name),
            filename: Set(input.filename),
            file_type: Set(input.file_type),
            project_id: Set(input.project_id),
            order_id: Set(input.order_id),
            description: Set(input.description),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Finds a document by id.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::NotFound` if no row matches.
    pub async fn find_by_id(&self, id: i32) -> Result<documents::Model, DocumentError> {
        documents::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    /// Lists documents, newest first, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: &DocumentFilter) -> Result<Vec<documents::Model>, DocumentError> {
        let mut query = documents::Entity::find();

        if let Some(project_id) = filter.project_id {
            query = query.filter(documents::Column::ProjectId.eq(project_id));
        }
        if let Some(order_id) = filter.order_id {
            query = query.filter(documents::Column::OrderId.eq(order_id));
        }

        Ok(query
            .order_by_desc(documents::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Deletes a document record and returns it, so the caller can remove
    /// the backing file.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::NotFound` if no row matches.
    pub async fn delete(&self, id: i32) -> Result<documents::Model, DocumentError> {
        let existing = self.find_by_id(id).await?;
        documents::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(existing)
    }
}
