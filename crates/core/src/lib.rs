//! Core domain logic for Adboard.
//!
//! Pure business logic with zero web or database dependencies:
//! - Profit arithmetic over decimal money values
//! - Posting-date parsing and the upcoming-exits window
//! - Platform/status vocabularies and listing de-duplication
//! - Document file storage
pub mod calendar;
pub mod catalog;
pub mod money;
pub mod storage;
