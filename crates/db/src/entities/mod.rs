//! `SeaORM` entity definitions.

pub mod advertisers;
pub mod bloggers;
pub mod documents;
pub mod months;
pub mod orders;
pub mod projects;
pub mod sessions;
