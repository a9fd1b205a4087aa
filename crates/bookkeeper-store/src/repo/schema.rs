//! Table schema derived from a record type
//!
//! Runs once per repository: collects the persisted fields of the record
//! type, drops the primary key, and resolves the column type of every field.

use std::collections::HashMap;

use bookkeeper_core::errors::RepositoryError;
use bookkeeper_core::model::{Field, FieldType, Record};
use bookkeeper_core::PK_FIELD_NAME;

use crate::errors::Result;

/// Registry of semantic type -> SQLite column type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTypeMap {
    mappings: HashMap<FieldType, &'static str>,
}

impl ColumnTypeMap {
    /// A registry with no mappings
    pub fn empty() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    /// Register (or replace) the column type for a semantic type
    pub fn with(mut self, field_type: FieldType, column_type: &'static str) -> Self {
        self.mappings.insert(field_type, column_type);
        self
    }

    /// Remove the mapping for a semantic type
    pub fn without(mut self, field_type: FieldType) -> Self {
        self.mappings.remove(&field_type);
        self
    }

    pub fn column_type(&self, field_type: FieldType) -> Option<&'static str> {
        self.mappings.get(&field_type).copied()
    }
}

impl Default for ColumnTypeMap {
    fn default() -> Self {
        // DATETIME values are stored as formatted text
        Self::empty()
            .with(FieldType::Text, "TEXT")
            .with(FieldType::Integer, "INTEGER")
            .with(FieldType::Real, "REAL")
            .with(FieldType::DateTime, "DATETIME")
    }
}

/// One persisted column, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub field_type: FieldType,
    pub column_type: &'static str,
}

/// Table name plus the ordered non-key columns of a record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    table_name: String,
    columns: Vec<Column>,
}

impl TableSchema {
    /// Build the schema for `R` from its persisted fields
    ///
    /// # Errors
    ///
    /// Returns `Schema` when `fields` is empty and `UnsupportedType` when a
    /// field's semantic type has no entry in `column_types`.
    pub fn introspect<R: Record>(
        fields: &[Field<R>],
        column_types: &ColumnTypeMap,
    ) -> Result<Self> {
        if fields.is_empty() {
            return Err(RepositoryError::EmptySchema {
                type_name: R::type_name().to_string(),
            }
            .into());
        }

        let columns = fields
            .iter()
            .map(|field| -> Result<Column> {
                let column_type = column_types.column_type(field.field_type()).ok_or_else(|| {
                    RepositoryError::UnsupportedType {
                        type_name: R::type_name().to_string(),
                        field: field.name().to_string(),
                        field_type: field.field_type(),
                    }
                })?;
                Ok(Column {
                    name: field.name(),
                    field_type: field.field_type(),
                    column_type,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            table_name: R::type_name().to_lowercase(),
            columns,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// The accessor table of `R` without its primary-key entry
pub fn persisted_fields<R: Record>() -> Vec<Field<R>> {
    R::fields()
        .into_iter()
        .filter(|field| field.name() != PK_FIELD_NAME)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookkeeper_core::errors::ExErrorKind;
    use bookkeeper_core::impl_record;
    use bookkeeper_core::model::Value;
    use chrono::NaiveDateTime;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Budget {
        primary_key: i64,
        period: String,
        amount: f64,
        category: i64,
    }

    impl_record!(Budget {
        period: String,
        amount: f64,
        category: i64,
    });

    #[derive(Debug, Clone, PartialEq)]
    struct Expense {
        primary_key: i64,
        amount: f64,
        spent_at: NaiveDateTime,
    }

    impl Default for Expense {
        fn default() -> Self {
            Self {
                primary_key: 0,
                amount: 0.0,
                spent_at: NaiveDateTime::MIN,
            }
        }
    }

    impl_record!(Expense {
        amount: f64,
        spent_at: NaiveDateTime,
    });

    #[derive(Debug, Clone, Default, PartialEq)]
    struct OnlyKey {
        primary_key: i64,
    }

    impl Record for OnlyKey {
        fn type_name() -> &'static str {
            "OnlyKey"
        }

        // Lists its key among the fields; the introspector must drop it
        fn fields() -> Vec<Field<Self>> {
            vec![Field::new(
                PK_FIELD_NAME,
                FieldType::Integer,
                |r: &Self| Value::Integer(r.primary_key),
                |r: &mut Self, v| match v {
                    Value::Integer(k) => {
                        r.primary_key = k;
                        true
                    }
                    _ => false,
                },
            )]
        }

        fn primary_key(&self) -> Option<i64> {
            Some(self.primary_key)
        }

        fn set_primary_key(&mut self, key: i64) {
            self.primary_key = key;
        }
    }

    #[test]
    fn test_introspect_keeps_field_order_and_maps_types() {
        let fields = persisted_fields::<Budget>();
        let schema = TableSchema::introspect(&fields, &ColumnTypeMap::default()).unwrap();

        assert_eq!(schema.table_name(), "budget");
        let columns: Vec<_> = schema
            .columns()
            .iter()
            .map(|c| (c.name, c.column_type))
            .collect();
        assert_eq!(
            columns,
            vec![("period", "TEXT"), ("amount", "REAL"), ("category", "INTEGER")]
        );
    }

    #[test]
    fn test_datetime_maps_to_datetime_column() {
        let fields = persisted_fields::<Expense>();
        let schema = TableSchema::introspect(&fields, &ColumnTypeMap::default()).unwrap();

        assert_eq!(schema.column("spent_at").unwrap().column_type, "DATETIME");
        assert_eq!(
            schema.column("spent_at").unwrap().field_type,
            FieldType::DateTime
        );
    }

    #[test]
    fn test_unmapped_type_is_rejected() {
        let fields = persisted_fields::<Expense>();
        let types = ColumnTypeMap::default().without(FieldType::DateTime);

        let err = TableSchema::introspect(&fields, &types).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::UnsupportedType);
        assert_eq!(err.field(), Some("spent_at"));
    }

    #[test]
    fn test_key_only_type_has_empty_schema() {
        let fields = persisted_fields::<OnlyKey>();
        assert!(fields.is_empty());

        let err = TableSchema::introspect(&fields, &ColumnTypeMap::default()).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Schema);
    }

    #[test]
    fn test_column_type_map_overrides() {
        let types = ColumnTypeMap::default().with(FieldType::DateTime, "TEXT");
        assert_eq!(types.column_type(FieldType::DateTime), Some("TEXT"));
        assert_eq!(ColumnTypeMap::empty().column_type(FieldType::Text), None);
    }
}
