//! Record <-> row conversion
//!
//! Writes read every field through the record's accessor table in schema
//! order. Reads build a fresh record from a row and refuse any column or
//! value the record type does not declare.

use bookkeeper_core::errors::RepositoryError;
use bookkeeper_core::model::{Field, Record, Value};

use super::codec::{Codec, SqlValue};
use crate::errors::Result;

#[derive(Debug)]
pub struct Marshaller<R> {
    fields: Vec<Field<R>>,
    codec: Codec,
}

impl<R: Record> Marshaller<R> {
    pub fn new(fields: Vec<Field<R>>, codec: Codec) -> Self {
        Self { fields, codec }
    }

    /// Encode a filter or key value the same way field values are encoded
    pub fn encode(&self, value: &Value) -> Result<SqlValue> {
        self.codec.encode(value)
    }

    /// Ordered storage values of a record's fields
    ///
    /// # Errors
    ///
    /// Returns `Serialization`, naming the field, for a value that cannot be
    /// stored.
    pub fn decompose(&self, record: &R) -> Result<Vec<SqlValue>> {
        self.fields
            .iter()
            .map(|field| {
                self.codec
                    .encode(&field.get(record))
                    .map_err(|e| e.with_field(field.name()))
            })
            .collect()
    }

    /// Build a record from a result row
    ///
    /// `columns` and `values` are parallel, in result order, and exclude the
    /// primary key, which is passed as `key`.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedField` for a column the record does not declare and
    /// `TypeMismatch` for a value whose decoded type differs from the
    /// declared one.
    pub fn compose(&self, key: i64, columns: &[String], values: Vec<SqlValue>) -> Result<R> {
        let mut record = R::default();

        for (column, raw) in columns.iter().zip(values) {
            let field = self
                .fields
                .iter()
                .find(|f| f.name() == column.as_str())
                .ok_or_else(|| RepositoryError::UnexpectedField {
                    field: column.clone(),
                })?;

            let value = self
                .codec
                .decode(field.field_type(), raw)
                .map_err(|e| e.with_field(column.as_str()))?;

            let actual = value.field_type();
            if actual != field.field_type() || !field.set(&mut record, value) {
                return Err(RepositoryError::TypeMismatch {
                    field: column.clone(),
                    expected: field.field_type(),
                    actual: actual.to_string(),
                }
                .into());
            }
        }

        record.set_primary_key(key);
        Ok(record)
    }
}
