use std::collections::BTreeMap;

use super::{ensure_unassigned_key, Filter, Repository};
use crate::errors::{RepositoryError, Result};
use crate::model::{Field, Record};

/// In-memory repository backed by a `BTreeMap`
///
/// Keys are assigned sequentially starting at 1 and never reused. Records
/// are cloned on the way in and on the way out, so callers never share state
/// with the repository. Not thread-safe; designed for single-threaded use
/// and tests.
#[derive(Debug)]
pub struct MemoryRepository<R> {
    records: BTreeMap<i64, R>,
    fields: Vec<Field<R>>,
    next_key: i64,
}

impl<R: Record + Clone> MemoryRepository<R> {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            fields: R::fields(),
            next_key: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn field(&self, name: &str) -> Result<&Field<R>> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| {
                RepositoryError::UnexpectedField {
                    field: name.to_string(),
                }
                .into()
            })
    }
}

impl<R: Record + Clone> Default for MemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record + Clone> Repository<R> for MemoryRepository<R> {
    fn add(&mut self, obj: &mut R) -> Result<i64> {
        ensure_unassigned_key(&*obj)?;

        let key = self.next_key;
        self.next_key += 1;
        obj.set_primary_key(key);
        self.records.insert(key, obj.clone());
        Ok(key)
    }

    fn get(&self, key: i64) -> Result<Option<R>> {
        Ok(self.records.get(&key).cloned())
    }

    fn get_all(&self, filter: Option<&Filter>) -> Result<Vec<R>> {
        let conditions = match filter {
            Some(filter) => filter
                .conditions()
                .iter()
                .map(|(name, value)| Ok((self.field(name)?, value)))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(self
            .records
            .values()
            .filter(|record| {
                conditions
                    .iter()
                    .all(|(field, value)| field.get(record) == **value)
            })
            .cloned()
            .collect())
    }

    fn update(&mut self, obj: &R) -> Result<()> {
        let key = obj
            .primary_key()
            .ok_or_else(|| RepositoryError::MissingPrimaryKey {
                type_name: R::type_name().to_string(),
            })?;

        match self.records.get_mut(&key) {
            Some(stored) => {
                *stored = obj.clone();
                Ok(())
            }
            None => Err(RepositoryError::UpdateMissingKey { key }.into()),
        }
    }

    fn delete(&mut self, key: i64) -> Result<()> {
        self.records
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::DeleteMissingKey { key }.into())
    }
}
