//! Request middleware.

pub mod auth;

pub use auth::{SESSION_COOKIE, auth_middleware};
