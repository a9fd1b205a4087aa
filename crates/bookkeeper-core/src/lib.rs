//! Bookkeeper Core - record model and repository contract
//!
//! This crate provides the pieces every repository implementation shares:
//! - `Record` trait and `impl_record!` macro describing persistable types
//! - Semantic field types and values (text, integer, real, date-time)
//! - The `Repository` contract and equality `Filter`
//! - A map-backed `MemoryRepository`
//! - Error facility (`ExError`, `ExErrorKind`, `RepositoryError`)
//! - Structured logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod repository;

pub use bookkeeper_core_types::schema;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, RepositoryError, Result};
pub use model::{Field, FieldKind, FieldType, Record, Value};
pub use repository::{Filter, MemoryRepository, Repository, PK_FIELD_NAME};
