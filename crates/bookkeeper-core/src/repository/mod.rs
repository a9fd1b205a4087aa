//! Generic repository contract
//!
//! A repository stores records of one type and hands out integer primary
//! keys. Implementations share the same preconditions:
//!
//! - `add` requires a record whose primary key is present and zero, and
//!   writes the assigned key back onto it
//! - `update` of a key that is not stored is a precondition violation
//! - `delete` of a key that is not stored is a not-found error

pub mod memory;

use crate::errors::{RepositoryError, Result};
use crate::model::{Record, Value};

pub use memory::MemoryRepository;

/// Name of the primary-key field and column
pub const PK_FIELD_NAME: &str = "primary_key";

/// Equality conditions ANDed together, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field = value`
    ///
    /// Setting a field that is already present replaces its value and keeps
    /// its original position.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        let value = value.into();
        match self.conditions.iter_mut().find(|(name, _)| *name == field) {
            Some(existing) => existing.1 = value,
            None => self.conditions.push((field, value)),
        }
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Storage for records of type `R`
pub trait Repository<R: Record> {
    /// Persist a new record and assign its primary key
    ///
    /// # Errors
    ///
    /// Returns `PreconditionViolation` if the record has no primary key or
    /// its primary key is already set.
    fn add(&mut self, obj: &mut R) -> Result<i64>;

    /// Fetch the record stored under `key`, if any
    fn get(&self, key: i64) -> Result<Option<R>>;

    /// Fetch every record, or only those matching all conditions of `filter`
    fn get_all(&self, filter: Option<&Filter>) -> Result<Vec<R>>;

    /// Overwrite the stored record with the same primary key
    ///
    /// # Errors
    ///
    /// Returns `PreconditionViolation` if no record is stored under the key.
    fn update(&mut self, obj: &R) -> Result<()>;

    /// Remove the record stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record is stored under the key.
    fn delete(&mut self, key: i64) -> Result<()>;
}

/// Check the `add` precondition: the record has a primary key and it is zero
pub fn ensure_unassigned_key<R: Record>(obj: &R) -> Result<()> {
    match obj.primary_key() {
        Some(0) => Ok(()),
        None => Err(RepositoryError::MissingPrimaryKey {
            type_name: R::type_name().to_string(),
        }
        .into()),
        Some(key) => Err(RepositoryError::PrimaryKeyAlreadySet {
            type_name: R::type_name().to_string(),
            key,
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_insertion_order() {
        let filter = Filter::new().eq("b", 1).eq("a", "x");
        let names: Vec<_> = filter.conditions().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_filter_replaces_repeated_field() {
        let filter = Filter::new().eq("a", 1).eq("b", 2).eq("a", 3);
        assert_eq!(
            filter.conditions(),
            &[
                ("a".to_string(), Value::Integer(3)),
                ("b".to_string(), Value::Integer(2)),
            ]
        );
    }

    #[test]
    fn test_empty_filter() {
        assert!(Filter::new().is_empty());
        assert!(!Filter::new().eq("a", 1).is_empty());
    }
}
