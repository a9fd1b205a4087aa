//! Bookkeeper Store - SQLite persistence for bookkeeper records
//!
//! Provides:
//! - Table schemas derived from a record's field table
//! - Value codec, including the fixed date-time text layout
//! - A `Repository` implementation backed by one SQLite file

pub mod db;
pub mod errors;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::{ColumnTypeMap, DateTimeFormat, RepositoryOptions, SqliteRepository};
