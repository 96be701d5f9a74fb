//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod advertiser;
pub mod blogger;
pub mod document;
pub mod month;
pub mod order;
pub mod project;
pub mod session;
pub mod stats;

pub use advertiser::{
    AdvertiserError, AdvertiserFilter, AdvertiserRepository, CreateAdvertiserInput,
    UpdateAdvertiserInput,
};
pub use blogger::{
    BloggerError, BloggerFilter, BloggerRepository, CreateBloggerInput, UpdateBloggerInput,
};
pub use document::{CreateDocumentInput, DocumentError, DocumentFilter, DocumentRepository};
pub use month::{CreateMonthInput, MonthDetail, MonthError, MonthRepository, UpdateMonthInput};
pub use order::{
    CreateOrderInput, InlineAdvertiserInput, InlineBloggerInput, OrderError, OrderFilter,
    OrderRepository, UpdateOrderInput,
};
pub use project::{
    CreateProjectInput, ProjectError, ProjectFilter, ProjectRepository, ProjectWithOrders,
    UpdateProjectInput,
};
pub use session::SessionRepository;
pub use stats::{StatsError, StatsRepository, StatsSummary};
