//! Error handling for bookkeeper-store
//!
//! Wraps bookkeeper-core ExError with store-specific helpers

use bookkeeper_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence).with_message(err.to_string())
}

/// Create a decode error for a storage value that no field type accepts
pub fn undecodable(storage_type: &str, expected: &str) -> ExError {
    ExError::new(ExErrorKind::TypeMismatch).with_message(format!(
        "Cannot decode {} storage value as {}",
        storage_type, expected
    ))
}
