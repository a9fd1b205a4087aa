//! Statement builder
//!
//! Only identifiers taken from the table schema (and the field names of a
//! filter) are written into the SQL text; every value is a `?` parameter.
//!
//! Schema identifiers are double-quoted so keywords such as `order` or
//! `from` work as names. Filter keys come from the caller and may name no
//! column at all; they are quoted with backticks, which SQLite never reads
//! as a string literal, so an unknown key still fails with "no such column".

use bookkeeper_core::{Filter, PK_FIELD_NAME};

use super::schema::TableSchema;

/// Double-quote a schema identifier
fn ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Backtick-quote a caller-supplied column name
fn filter_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn column_list(schema: &TableSchema) -> String {
    schema
        .columns()
        .iter()
        .map(|c| ident(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

pub fn create_table(schema: &TableSchema) -> String {
    let columns = schema
        .columns()
        .iter()
        .map(|c| format!("{} {}", ident(c.name), c.column_type))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "CREATE TABLE IF NOT EXISTS {} ({} INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL UNIQUE, {})",
        ident(schema.table_name()),
        ident(PK_FIELD_NAME),
        columns
    )
}

pub fn insert(schema: &TableSchema) -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        ident(schema.table_name()),
        column_list(schema),
        placeholders(schema.columns().len())
    )
}

/// Select the field columns of one row; binds the primary key
pub fn select_by_key(schema: &TableSchema) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = ?",
        column_list(schema),
        ident(schema.table_name()),
        ident(PK_FIELD_NAME)
    )
}

/// Select the primary key and field columns of every row matching `filter`
///
/// Binds one parameter per filter condition, in filter order.
pub fn select_all(schema: &TableSchema, filter: Option<&Filter>) -> String {
    let mut sql = format!(
        "SELECT {}, {} FROM {}",
        ident(PK_FIELD_NAME),
        column_list(schema),
        ident(schema.table_name())
    );

    if let Some(filter) = filter.filter(|f| !f.is_empty()) {
        let conditions = filter
            .conditions()
            .iter()
            .map(|(name, _)| format!("{} = ?", filter_ident(name)))
            .collect::<Vec<_>>()
            .join(" AND ");
        sql.push_str(" WHERE ");
        sql.push_str(&conditions);
    }

    sql
}

/// Overwrite the field columns of one row; binds the fields, then the key
pub fn update(schema: &TableSchema) -> String {
    let assignments = schema
        .columns()
        .iter()
        .map(|c| format!("{} = ?", ident(c.name)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE {} = ?",
        ident(schema.table_name()),
        assignments,
        ident(PK_FIELD_NAME)
    )
}

pub fn delete(schema: &TableSchema) -> String {
    format!(
        "DELETE FROM {} WHERE {} = ?",
        ident(schema.table_name()),
        ident(PK_FIELD_NAME)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::schema::{persisted_fields, ColumnTypeMap};
    use bookkeeper_core::impl_record;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Custom {
        primary_key: i64,
        data: i64,
        data_str: String,
    }

    impl_record!(Custom {
        data: i64,
        data_str: String,
    });

    fn schema() -> TableSchema {
        TableSchema::introspect(&persisted_fields::<Custom>(), &ColumnTypeMap::default())
            .unwrap()
    }

    #[test]
    fn test_create_table() {
        assert_eq!(
            create_table(&schema()),
            r#"CREATE TABLE IF NOT EXISTS "custom" ("primary_key" INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL UNIQUE, "data" INTEGER, "data_str" TEXT)"#
        );
    }

    #[test]
    fn test_insert() {
        assert_eq!(
            insert(&schema()),
            r#"INSERT INTO "custom" ("data", "data_str") VALUES (?, ?)"#
        );
    }

    #[test]
    fn test_select_by_key() {
        assert_eq!(
            select_by_key(&schema()),
            r#"SELECT "data", "data_str" FROM "custom" WHERE "primary_key" = ?"#
        );
    }

    #[test]
    fn test_select_all_without_filter() {
        let expected = r#"SELECT "primary_key", "data", "data_str" FROM "custom""#;
        assert_eq!(select_all(&schema(), None), expected);
        assert_eq!(select_all(&schema(), Some(&Filter::new())), expected);
    }

    #[test]
    fn test_select_all_follows_filter_order() {
        let filter = Filter::new().eq("data_str", "test").eq("data", 0);
        assert_eq!(
            select_all(&schema(), Some(&filter)),
            r#"SELECT "primary_key", "data", "data_str" FROM "custom" WHERE `data_str` = ? AND `data` = ?"#
        );
    }

    #[test]
    fn test_filter_values_are_never_inlined() {
        let filter = Filter::new().eq("data_str", "'; DROP TABLE custom; --");
        let sql = select_all(&schema(), Some(&filter));
        assert!(!sql.contains("DROP"));
    }

    #[test]
    fn test_quotes_inside_identifiers_are_doubled() {
        assert_eq!(ident("order"), r#""order""#);
        assert_eq!(ident(r#"a"b"#), r#""a""b""#);
        assert_eq!(filter_ident("a`b"), "`a``b`");
    }

    #[test]
    fn test_update() {
        assert_eq!(
            update(&schema()),
            r#"UPDATE "custom" SET "data" = ?, "data_str" = ? WHERE "primary_key" = ?"#
        );
    }

    #[test]
    fn test_delete() {
        assert_eq!(
            delete(&schema()),
            r#"DELETE FROM "custom" WHERE "primary_key" = ?"#
        );
    }
}
