use bookkeeper_core::impl_record;
use bookkeeper_core::model::{Field, Record};

/// Record with an integer and a text field
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
    #[allow(dead_code)]
    pub fn new(data: i64, data_str: &str) -> Self {
        Self {
            primary_key: 0,
            data,
            data_str: data_str.to_string(),
        }
    }
}

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
            bookkeeper_core::FieldType::Text,
            |r: &Self| bookkeeper_core::Value::Text(r.name.clone()),
            |r: &mut Self, v| match v {
                bookkeeper_core::Value::Text(s) => {
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
