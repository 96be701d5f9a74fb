//! Initial database migration.
//!
//! Creates the core tables. Foreign-key actions encode the delete semantics:
//! removing a project takes its orders and documents with it, while removing
//! a blogger, advertiser, or month only detaches dependents.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(BLOGGERS_SQL).await?;
        db.execute_unprepared(ADVERTISERS_SQL).await?;
        db.execute_unprepared(MONTHS_SQL).await?;
        db.execute_unprepared(PROJECTS_SQL).await?;
        db.execute_unprepared(ORDERS_SQL).await?;
        db.execute_unprepared(DOCUMENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const BLOGGERS_SQL: &str = r"
CREATE TABLE bloggers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    platform TEXT,
    link TEXT,
    contact_link TEXT,
    rkn_info TEXT,
    telegram TEXT,
    created_at TEXT NOT NULL
);

CREATE UNIQUE INDEX idx_bloggers_name ON bloggers(name);
";

const ADVERTISERS_SQL: &str = r"
CREATE TABLE advertisers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    telegram TEXT,
    created_at TEXT NOT NULL
);

CREATE UNIQUE INDEX idx_advertisers_name ON advertisers(name);
";

const MONTHS_SQL: &str = r"
CREATE TABLE months (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    created_at TEXT NOT NULL
);
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    month_id INTEGER REFERENCES months(id) ON DELETE SET NULL,
    advertiser_id INTEGER REFERENCES advertisers(id) ON DELETE SET NULL,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'active',
    created_at TEXT NOT NULL
);

CREATE INDEX idx_projects_month ON projects(month_id);
CREATE INDEX idx_projects_advertiser ON projects(advertiser_id);
";

const ORDERS_SQL: &str = r"
CREATE TABLE orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT,
    blogger_id INTEGER REFERENCES bloggers(id) ON DELETE SET NULL,
    advertiser_id INTEGER REFERENCES advertisers(id) ON DELETE SET NULL,
    project_id INTEGER REFERENCES projects(id) ON DELETE CASCADE,
    month_id INTEGER REFERENCES months(id) ON DELETE SET NULL,
    product TEXT,
    cost REAL NOT NULL DEFAULT 0,
    blogger_fee REAL NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'negotiation',
    notes TEXT,
    link TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX idx_orders_date ON orders(date);
CREATE INDEX idx_orders_blogger ON orders(blogger_id);
CREATE INDEX idx_orders_advertiser ON orders(advertiser_id);
CREATE INDEX idx_orders_project ON orders(project_id);
CREATE INDEX idx_orders_month ON orders(month_id);
";

const DOCUMENTS_SQL: &str = r"
CREATE TABLE documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    filename TEXT NOT NULL,
    file_type TEXT,
    project_id INTEGER REFERENCES projects(id) ON DELETE CASCADE,
    order_id INTEGER REFERENCES orders(id) ON DELETE CASCADE,
    description TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX idx_documents_project ON documents(project_id);
CREATE INDEX idx_documents_order ON documents(order_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS documents;
DROP TABLE IF EXISTS orders;
DROP TABLE IF EXISTS projects;
DROP TABLE IF EXISTS months;
DROP TABLE IF EXISTS advertisers;
DROP TABLE IF EXISTS bloggers;
";
