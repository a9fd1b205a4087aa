//! Conversion between semantic values and SQLite storage values
//!
//! Text, integer and real values map onto SQLite's native storage classes
//! unchanged. Date-times have no native class and are stored as text in a
//! fixed pattern, `DD/MM/YY HH:MM:SS.ffffff` by default.

use bookkeeper_core::errors::RepositoryError;
use bookkeeper_core::model::{FieldType, Value};
use chrono::NaiveDateTime;

use crate::errors::{undecodable, Result};

pub use rusqlite::types::Value as SqlValue;

/// Textual layout of stored date-times
///
/// `TwoDigitYear` is the layout existing databases were written with and
/// stays the default. Two-digit years only round-trip between 1970 and 2068;
/// `FourDigitYear` has no such limit but cannot read `TwoDigitYear` data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateTimeFormat {
    #[default]
    TwoDigitYear,
    FourDigitYear,
}

impl DateTimeFormat {
    /// chrono pattern used when writing
    pub fn encode_pattern(&self) -> &'static str {
        match self {
            DateTimeFormat::TwoDigitYear => "%d/%m/%y %H:%M:%S%.6f",
            DateTimeFormat::FourDigitYear => "%d/%m/%Y %H:%M:%S%.6f",
        }
    }

    /// chrono pattern used when reading
    pub fn decode_pattern(&self) -> &'static str {
        match self {
            DateTimeFormat::TwoDigitYear => "%d/%m/%y %H:%M:%S%.f",
            DateTimeFormat::FourDigitYear => "%d/%m/%Y %H:%M:%S%.f",
        }
    }
}

/// Bidirectional value codec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    datetime_format: DateTimeFormat,
}

impl Codec {
    pub fn new(datetime_format: DateTimeFormat) -> Self {
        Self { datetime_format }
    }

    pub fn datetime_format(&self) -> DateTimeFormat {
        self.datetime_format
    }

    /// Convert a semantic value into its storage value
    ///
    /// Date-times are truncated to microseconds.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for a NaN real, which SQLite would store as
    /// NULL and never read back.
    pub fn encode(&self, value: &Value) -> Result<SqlValue> {
        Ok(match value {
            Value::Text(v) => SqlValue::Text(v.clone()),
            Value::Integer(v) => SqlValue::Integer(*v),
            Value::Real(v) if v.is_nan() => return Err(RepositoryError::NotANumber.into()),
            Value::Real(v) => SqlValue::Real(*v),
            Value::DateTime(v) => SqlValue::Text(
                v.format(self.datetime_format.encode_pattern())
                    .to_string(),
            ),
        })
    }

    /// Convert a storage value back into a semantic value
    ///
    /// Only text read for a `DateTime` field is transformed; every other
    /// storage value decodes to its own kind, and the caller checks it
    /// against the declared type.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for text that does not match the date-time
    /// pattern and `TypeMismatch` for NULL or BLOB storage values.
    pub fn decode(&self, field_type: FieldType, raw: SqlValue) -> Result<Value> {
        match raw {
            SqlValue::Integer(v) => Ok(Value::Integer(v)),
            SqlValue::Real(v) => Ok(Value::Real(v)),
            SqlValue::Text(v) if field_type == FieldType::DateTime => {
                self.parse_datetime(&v).map(Value::DateTime)
            }
            SqlValue::Text(v) => Ok(Value::Text(v)),
            SqlValue::Null => Err(undecodable("NULL", field_type.name())),
            SqlValue::Blob(_) => Err(undecodable("BLOB", field_type.name())),
        }
    }

    fn parse_datetime(&self, text: &str) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(text, self.datetime_format.decode_pattern()).map_err(|e| {
            RepositoryError::InvalidDateTime {
                value: text.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}
