//! SQLite repository implementation
//!
//! Persists any `Record` type into one table named after the type. Each
//! operation opens its own connection, runs a single statement and closes
//! the connection before returning; nothing is held between calls.

use std::path::{Path, PathBuf};
use std::time::Instant;

use bookkeeper_core::errors::RepositoryError;
use bookkeeper_core::model::Record;
use bookkeeper_core::repository::ensure_unassigned_key;
use bookkeeper_core::{log_op_end, log_op_error, log_op_start, Filter, Repository};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, Statement};

use super::codec::{Codec, DateTimeFormat, SqlValue};
use super::marshal::Marshaller;
use super::schema::{persisted_fields, ColumnTypeMap, TableSchema};
use super::sql;
use crate::db;
use crate::errors::{from_rusqlite, Result};

const OP_INIT: &str = "sqlite_repo.init";
const OP_ADD: &str = "sqlite_repo.add";
const OP_GET: &str = "sqlite_repo.get";
const OP_GET_ALL: &str = "sqlite_repo.get_all";
const OP_UPDATE: &str = "sqlite_repo.update";
const OP_DELETE: &str = "sqlite_repo.delete";

/// Repository configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryOptions {
    /// Column type for each semantic type; fields of an unmapped type make
    /// construction fail
    pub column_types: ColumnTypeMap,
    /// Layout of stored date-time text
    pub datetime_format: DateTimeFormat,
}

/// SQLite-backed repository for records of type `R`
#[derive(Debug)]
pub struct SqliteRepository<R> {
    db_path: PathBuf,
    schema: TableSchema,
    marshaller: Marshaller<R>,
}

impl<R: Record> SqliteRepository<R> {
    /// Open a repository with the default options
    ///
    /// Creates the table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `Schema` or `UnsupportedType` if `R` cannot be mapped, and
    /// `Persistence` if the database cannot be opened or the table created.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_options(db_path, RepositoryOptions::default())
    }

    /// Open a repository with explicit options
    pub fn with_options(db_path: impl Into<PathBuf>, options: RepositoryOptions) -> Result<Self> {
        let fields = persisted_fields::<R>();
        let schema = TableSchema::introspect(&fields, &options.column_types)?;
        let repo = Self {
            db_path: db_path.into(),
            schema,
            marshaller: Marshaller::new(fields, Codec::new(options.datetime_format)),
        };

        repo.logged(OP_INIT, || {
            let create = sql::create_table(&repo.schema);
            repo.with_connection(|conn| execute(conn, &create, &[]))?;
            Ok(())
        })?;

        Ok(repo)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn table_name(&self) -> &str {
        self.schema.table_name()
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        db::with_connection(&self.db_path, f)
    }

    /// Wrap one operation in start/end events and attach op context to errors
    fn logged<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let table = self.schema.table_name();
        let started = Instant::now();
        log_op_start!(op, table = table);

        let result = f().map_err(|err| err.with_op(op).with_entity(table));

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => log_op_end!(op, duration_ms = duration_ms, table = table),
            Err(err) => log_op_error!(op, err, duration_ms = duration_ms, table = table),
        }
        result
    }
}

impl<R: Record> Repository<R> for SqliteRepository<R> {
    fn add(&mut self, obj: &mut R) -> Result<i64> {
        self.logged(OP_ADD, || {
            ensure_unassigned_key(&*obj)?;

            let values = self.marshaller.decompose(obj)?;
            let insert = sql::insert(&self.schema);
            let key = self.with_connection(|conn| {
                execute(conn, &insert, &values)?;
                Ok(conn.last_insert_rowid())
            })?;

            obj.set_primary_key(key);
            Ok(key)
        })
    }

    fn get(&self, key: i64) -> Result<Option<R>> {
        self.logged(OP_GET, || {
            let select = sql::select_by_key(&self.schema);
            let row = self.with_connection(|conn| {
                let mut stmt = prepare(conn, &select)?;
                let columns = column_names(&stmt);
                let values = stmt
                    .query_row(params![key], |row| read_values(row, 0, columns.len()))
                    .optional()
                    .map_err(from_rusqlite)?;
                Ok(values.map(|values| (columns, values)))
            })?;

            row.map(|(columns, values)| self.marshaller.compose(key, &columns, values))
                .transpose()
        })
    }

    fn get_all(&self, filter: Option<&Filter>) -> Result<Vec<R>> {
        self.logged(OP_GET_ALL, || {
            let select = sql::select_all(&self.schema, filter);
            let params = filter
                .map(|f| {
                    f.conditions()
                        .iter()
                        .map(|(name, value)| {
                            self.marshaller
                                .encode(value)
                                .map_err(|e| e.with_field(name.as_str()))
                        })
                        .collect::<Result<Vec<SqlValue>>>()
                })
                .transpose()?
                .unwrap_or_default();

            let (columns, rows) = self.with_connection(|conn| {
                let mut stmt = prepare(conn, &select)?;
                let columns = column_names(&stmt);
                let mut rows = stmt
                    .query(params_from_iter(params.iter()))
                    .map_err(from_rusqlite)?;

                let mut raw = Vec::new();
                while let Some(row) = rows.next().map_err(from_rusqlite)? {
                    let key: i64 = row.get(0).map_err(from_rusqlite)?;
                    let values = read_values(row, 1, columns.len()).map_err(from_rusqlite)?;
                    raw.push((key, values));
                }
                Ok((columns, raw))
            })?;

            // Column 0 is the primary key
            let field_columns = &columns[1..];
            rows.into_iter()
                .map(|(key, values)| self.marshaller.compose(key, field_columns, values))
                .collect()
        })
    }

    fn update(&mut self, obj: &R) -> Result<()> {
        self.logged(OP_UPDATE, || {
            let key = obj
                .primary_key()
                .ok_or_else(|| RepositoryError::MissingPrimaryKey {
                    type_name: R::type_name().to_string(),
                })?;

            let mut values = self.marshaller.decompose(obj)?;
            values.push(SqlValue::Integer(key));
            let update = sql::update(&self.schema);
            let affected = self.with_connection(|conn| execute(conn, &update, &values))?;

            if affected == 0 {
                return Err(RepositoryError::UpdateMissingKey { key }.into());
            }
            Ok(())
        })
    }

    fn delete(&mut self, key: i64) -> Result<()> {
        self.logged(OP_DELETE, || {
            let delete = sql::delete(&self.schema);
            let affected = self
                .with_connection(|conn| execute(conn, &delete, &[SqlValue::Integer(key)]))?;

            if affected == 0 {
                return Err(RepositoryError::DeleteMissingKey { key }.into());
            }
            Ok(())
        })
    }
}

fn execute(conn: &Connection, sql: &str, values: &[SqlValue]) -> Result<usize> {
    tracing::debug!(sql = sql, params = values.len(), "execute");
    conn.execute(sql, params_from_iter(values.iter()))
        .map_err(from_rusqlite)
}

fn prepare<'conn>(conn: &'conn Connection, sql: &str) -> Result<Statement<'conn>> {
    tracing::debug!(sql = sql, "prepare");
    conn.prepare(sql).map_err(from_rusqlite)
}

fn column_names(stmt: &Statement<'_>) -> Vec<String> {
    stmt.column_names().into_iter().map(String::from).collect()
}

fn read_values(row: &Row<'_>, from: usize, to: usize) -> rusqlite::Result<Vec<SqlValue>> {
    (from..to).map(|idx| row.get(idx)).collect()
}
