#![allow(dead_code)]

use std::path::PathBuf;

use bookkeeper_core::impl_record;
use bookkeeper_core::model::{Field, FieldType, Record, Value};
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

/// Scratch database file; the directory is removed when the guard drops
pub fn temp_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookkeeper.db");
    (dir, path)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Custom {
    pub primary_key: i64,
    pub data: i64,
    pub data_str: String,
}

impl_record!(Custom {
    data: i64,
    data_str: String,
});

impl Custom {
    pub fn new(data: i64, data_str: &str) -> Self {
        Self {
            primary_key: 0,
            data,
            data_str: data_str.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub primary_key: i64,
    pub amount: f64,
    pub category: i64,
    pub comment: String,
    pub spent_at: NaiveDateTime,
}

impl Default for Expense {
    fn default() -> Self {
        Self {
            primary_key: 0,
            amount: 0.0,
            category: 0,
            comment: String::new(),
            spent_at: NaiveDateTime::MIN,
        }
    }
}

impl_record!(Expense {
    amount: f64,
    category: i64,
    comment: String,
    spent_at: NaiveDateTime,
});

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, us: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_micro_opt(h, mi, s, us)
        .unwrap()
}

/// Table and column names that are SQL keywords
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub primary_key: i64,
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl_record!(Order {
    from: String,
    to: String,
    amount: f64,
});

/// Record type that carries no primary key at all
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keyless {
    pub name: String,
}

impl Record for Keyless {
    fn type_name() -> &'static str {
        "Keyless"
    }

    fn fields() -> Vec<Field<Self>> {
        vec![Field::new(
            "name",
            FieldType::Text,
            |r: &Self| Value::Text(r.name.clone()),
            |r: &mut Self, v| match v {
                Value::Text(s) => {
                    r.name = s;
                    true
                }
                _ => false,
            },
        )]
    }

    fn primary_key(&self) -> Option<i64> {
        None
    }

    fn set_primary_key(&mut self, _key: i64) {}
}

/// Record type with nothing to persist besides its key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OnlyKey {
    pub primary_key: i64,
}

impl Record for OnlyKey {
    fn type_name() -> &'static str {
        "OnlyKey"
    }

    fn fields() -> Vec<Field<Self>> {
        Vec::new()
    }

    fn primary_key(&self) -> Option<i64> {
        Some(self.primary_key)
    }

    fn set_primary_key(&mut self, key: i64) {
        self.primary_key = key;
    }
}
