//! Order repository for database operations.
//!
//! Order creation may inline-create a new blogger and/or advertiser in the
//! same database transaction, so a failing order write never leaves a
//! half-created party behind.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::entities::{advertisers, bloggers, months, orders, projects};

/// Error types for order operations.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// Order not found.
    #[error("Order not found: {0}")]
    NotFound(i32),

    /// Selected blogger does not exist.
    #[error("Blogger not found: {0}")]
    BloggerNotFound(i32),

    /// Selected advertiser does not exist.
    #[error("Advertiser not found: {0}")]
    AdvertiserNotFound(i32),

    /// Selected project does not exist.
    #[error("Project not found: {0}")]
    ProjectNotFound(i32),

    /// Selected month does not exist.
    #[error("Month not found: {0}")]
    MonthNotFound(i32),

    /// Monetary field was negative.
    #[error("'{0}' must not be negative")]
    NegativeAmount(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Inline blogger created as a side effect of an order write.
#[derive(Debug, Clone)]
pub struct InlineBloggerInput {
    /// Display name; blank skips the sub-create.
    pub name: String,
    /// Publishing platform.
    pub platform: Option<String>,
}

/// Inline advertiser created as a side effect of an order write.
#[derive(Debug, Clone)]
pub struct InlineAdvertiserInput {
    /// Company or contact name; blank skips the sub-create.
    pub name: String,
    /// Telegram handle.
    pub telegram: Option<String>,
}

/// Input for creating an order.
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    /// Posting date.
    pub date: Option<NaiveDate>,
    /// Existing blogger selection.
    pub blogger_id: Option<i32>,
    /// Inline blogger creation; takes precedence over `blogger_id`.
    pub new_blogger: Option<InlineBloggerInput>,
    /// Existing advertiser selection.
    pub advertiser_id: Option<i32>,
    /// Inline advertiser creation; takes precedence over `advertiser_id`.
    pub new_advertiser: Option<InlineAdvertiserInput>,
    /// Project the order belongs to.
    pub project_id: Option<i32>,
    /// Month bucket, independent of the project association.
    pub month_id: Option<i32>,
    /// Advertised product.
    pub product: Option<String>,
    /// What the advertiser pays.
    pub cost: Decimal,
    /// What the blogger takes.
    pub blogger_fee: Decimal,
    /// Order status.
    pub status: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Link to the published post.
    pub link: Option<String>,
}

/// Input for updating an order.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrderInput {
    /// Posting date.
    pub date: Option<Option<NaiveDate>>,
    /// Blogger selection.
    pub blogger_id: Option<Option<i32>>,
    /// Advertiser selection.
    pub advertiser_id: Option<Option<i32>>,
    /// Project the order belongs to.
    pub project_id: Option<Option<i32>>,
    /// Month bucket.
    pub month_id: Option<Option<i32>>,
    /// Advertised product.
    pub product: Option<Option<String>>,
    /// What the advertiser pays.
    pub cost: Option<Decimal>,
    /// What the blogger takes.
    pub blogger_fee: Option<Decimal>,
    /// Order status.
    pub status: Option<String>,
    /// Free-text notes.
    pub notes: Option<Option<String>>,
    /// Link to the published post.
    pub link: Option<Option<String>>,
}

/// Filter options for listing orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Exact match on status.
    pub status: Option<String>,
    /// Exact match on blogger.
    pub blogger_id: Option<i32>,
    /// Exact match on advertiser.
    pub advertiser_id: Option<i32>,
    /// Exact match on project.
    pub project_id: Option<i32>,
    /// Exact match on month bucket.
    pub month_id: Option<i32>,
    /// Case-insensitive substring match on product.
    pub product_contains: Option<String>,
}

/// Order repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    db: DatabaseConnection,
}

impl OrderRepository {
    /// Creates a new order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new order, inline-creating a blogger/advertiser if asked.
    ///
    /// The whole operation is one transaction: the inline rows' generated
    /// ids feed the order's foreign keys before commit, and any failure
    /// rolls everything back. An inline request with a blank name is
    /// skipped and the corresponding foreign key stays null.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected foreign key does not exist, a
    /// monetary field is negative, or the database fails.
    pub async fn create(&self, input: CreateOrderInput) -> Result<orders::Model, OrderError> {
        validate_amounts(input.cost, input.blogger_fee)?;

        let txn = self.db.begin().await?;

        let blogger_id = match (&input.new_blogger, input.blogger_id) {
            (Some(inline), _) => insert_inline_blogger(&txn, inline).await?,
            (None, Some(id)) => {
                ensure_blogger_exists(&txn, id).await?;
                Some(id)
            }
            (None, None) => None,
        };

        let advertiser_id = match (&input.new_advertiser, input.advertiser_id) {
            (Some(inline), _) => insert_inline_advertiser(&txn, inline).await?,
            (None, Some(id)) => {
                ensure_advertiser_exists(&txn, id).await?;
                Some(id)
            }
            (None, None) => None,
        };

        if let Some(id) = input.project_id {
            ensure_project_exists(&txn, id).await?;
        }
        if let Some(id) = input.month_id {
            ensure_month_exists(&txn, id).await?;
        }

        let model = orders::ActiveModel {
            date: Set(input.date),
            blogger_id: Set(blogger_id),
            advertiser_id: Set(advertiser_id),
            project_id: Set(input.project_id),
            month_id: Set(input.month_id),
            product: Set(input.product),
            cost: Set(input.cost),
            blogger_fee: Set(input.blogger_fee),
            status: Set(input.status),
            notes: Set(input.notes),
            link: Set(input.link),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let order = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(order)
    }

    /// Finds an order by id.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` if no row matches.
    pub async fn find_by_id(&self, id: i32) -> Result<orders::Model, OrderError> {
        orders::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    /// Lists orders, latest posting date first, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: &OrderFilter) -> Result<Vec<orders::Model>, OrderError> {
        let mut query = orders::Entity::find();

        if let Some(status) = &filter.status {
            query = query.filter(orders::Column::Status.eq(status));
        }
        if let Some(blogger_id) = filter.blogger_id {
            query = query.filter(orders::Column::BloggerId.eq(blogger_id));
        }
        if let Some(advertiser_id) = filter.advertiser_id {
            query = query.filter(orders::Column::AdvertiserId.eq(advertiser_id));
        }
        if let Some(project_id) = filter.project_id {
            query = query.filter(orders::Column::ProjectId.eq(project_id));
        }
        if let Some(month_id) = filter.month_id {
            query = query.filter(orders::Column::MonthId.eq(month_id));
        }
        if let Some(product) = &filter.product_contains {
            query = query.filter(orders::Column::Product.contains(product));
        }

        Ok(query
            .order_by_desc(orders::Column::Date)
            .order_by_desc(orders::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Updates an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order or a selected foreign key does not
    /// exist, a monetary field is negative, or the database fails.
    pub async fn update(&self, id: i32, input: UpdateOrderInput) -> Result<orders::Model, OrderError> {
        if let Some(cost) = input.cost
            && cost < Decimal::ZERO
        {
            return Err(OrderError::NegativeAmount("cost"));
        }
        if let Some(fee) = input.blogger_fee
            && fee < Decimal::ZERO
        {
            return Err(OrderError::NegativeAmount("blogger_fee"));
        }

        let txn = self.db.begin().await?;

        let existing = orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        if let Some(Some(blogger_id)) = input.blogger_id {
            ensure_blogger_exists(&txn, blogger_id).await?;
        }
        if let Some(Some(advertiser_id)) = input.advertiser_id {
            ensure_advertiser_exists(&txn, advertiser_id).await?;
        }
        if let Some(Some(project_id)) = input.project_id {
            ensure_project_exists(&txn, project_id).await?;
        }
        if let Some(Some(month_id)) = input.month_id {
            ensure_month_exists(&txn, month_id).await?;
        }

        let mut model: orders::ActiveModel = existing.into();

        if let Some(date) = input.date {
            model.date = Set(date);
        }
        if let Some(blogger_id) = input.blogger_id {
            model.blogger_id = Set(blogger_id);
        }
        if let Some(advertiser_id) = input.advertiser_id {
            model.advertiser_id = Set(advertiser_id);
        }
        if let Some(project_id) = input.project_id {
            model.project_id = Set(project_id);
        }
        if let Some(month_id) = input.month_id {
            model.month_id = Set(month_id);
        }
        if let Some(product) = input.product {
            model.product = Set(product);
        }
        if let Some(cost) = input.cost {
            model.cost = Set(cost);
        }
        if let Some(fee) = input.blogger_fee {
            model.blogger_fee = Set(fee);
        }
        if let Some(status) = input.status {
            model.status = Set(status);
        }
        if let Some(notes) = input.notes {
            model.notes = Set(notes);
        }
        if let Some(link) = input.link {
            model.link = Set(link);
        }

        let order = model.update(&txn).await?;
        txn.commit().await?;

        Ok(order)
    }

    /// Deletes an order. Its documents go with it (cascade).
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` if no row matches.
    pub async fn delete(&self, id: i32) -> Result<(), OrderError> {
        let result = orders::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(OrderError::NotFound(id));
        }
        Ok(())
    }
}

fn validate_amounts(cost: Decimal, blogger_fee: Decimal) -> Result<(), OrderError> {
    if cost < Decimal::ZERO {
        return Err(OrderError::NegativeAmount("cost"));
    }
    if blogger_fee < Decimal::ZERO {
        return Err(OrderError::NegativeAmount("blogger_fee"));
    }
    Ok(())
}

/// Inserts an inline blogger; a blank name skips the insert and the order's
/// foreign key stays null.
async fn insert_inline_blogger<C: ConnectionTrait>(
    conn: &C,
    inline: &InlineBloggerInput,
) -> Result<Option<i32>, OrderError> {
    let name = inline.name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    let model = bloggers::ActiveModel {
        name: Set(name.to_string()),
        platform: Set(inline.platform.clone()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = model.insert(conn).await?;
    debug!(blogger_id = inserted.id, "Inline blogger created");
    Ok(Some(inserted.id))
}

/// Inserts an inline advertiser; a blank name skips the insert.
async fn insert_inline_advertiser<C: ConnectionTrait>(
    conn: &C,
    inline: &InlineAdvertiserInput,
) -> Result<Option<i32>, OrderError> {
    let name = inline.name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    let model = advertisers::ActiveModel {
        name: Set(name.to_string()),
        telegram: Set(inline.telegram.clone()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = model.insert(conn).await?;
    debug!(advertiser_id = inserted.id, "Inline advertiser created");
    Ok(Some(inserted.id))
}

async fn ensure_blogger_exists<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), OrderError> {
    bloggers::Entity::find_by_id(id)
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or(OrderError::BloggerNotFound(id))
}

async fn ensure_advertiser_exists<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), OrderError> {
    advertisers::Entity::find_by_id(id)
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or(OrderError::AdvertiserNotFound(id))
}

async fn ensure_project_exists<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), OrderError> {
    projects::Entity::find_by_id(id)
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or(OrderError::ProjectNotFound(id))
}

async fn ensure_month_exists<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), OrderError> {
    months::Entity::find_by_id(id)
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or(OrderError::MonthNotFound(id))
}
