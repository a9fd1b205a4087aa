//! Repository layer persisting records to SQLite
//!
//! - `schema`: record type -> table layout
//! - `codec`: semantic values <-> storage values
//! - `sql`: statement text for each operation
//! - `marshal`: record <-> row
//! - `sqlite_repo`: the CRUD executor tying them together

pub mod codec;
pub mod marshal;
pub mod schema;
pub mod sql;
pub mod sqlite_repo;

pub use codec::{Codec, DateTimeFormat, SqlValue};
pub use schema::{ColumnTypeMap, TableSchema};
pub use sqlite_repo::{RepositoryOptions, SqliteRepository};
