//! Document file storage.
//!
//! Uploaded files live under a single configured directory on the local
//! filesystem, accessed through OpenDAL.

mod error;
mod service;

pub use error::StorageError;
pub use service::{ALLOWED_EXTENSIONS, StorageService, file_extension, sanitize_filename};
