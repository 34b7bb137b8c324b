//! SQLite store client implementation.
//!
//! Provides the `SqliteStore` struct that implements the `QueryEngine` trait
//! over the single-table store built by the dataset loader. Every call opens
//! its own read-only connection and closes it before returning.

use crate::db::{quote_identifier, Column, ColumnInfo, QueryEngine, QueryResult, Row, Table, Value};
use crate::error::{QueryGateError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column as SqlxColumn, Connection, Row as SqlxRow, TypeInfo, ValueRef};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// Read-only client for the store file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    table: String,
    options: SqliteConnectOptions,
}

impl SqliteStore {
    /// Creates a client for an existing store.
    ///
    /// Fails if the store file does not exist; the dataset loader must have
    /// run first.
    pub fn open(path: &Path, table: impl Into<String>) -> Result<Self> {
        if !path.exists() {
            return Err(QueryGateError::data_source(format!(
                "Store not found at {}",
                path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        Ok(Self {
            path: path.to_path_buf(),
            table: table.into(),
            options,
        })
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(|e| QueryGateError::execution(format_query_error(e)))
    }
}

#[async_trait]
impl QueryEngine for SqliteStore {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();
        let mut conn = self.connect().await?;

        let fetched = sqlx::query(sql).fetch_all(&mut conn).await;

        if let Err(e) = conn.close().await {
            warn!("Failed to close store connection: {e}");
        }

        let result = fetched.map_err(|e| QueryGateError::execution(format_query_error(e)))?;
        let execution_time = start.elapsed();
        debug!("Query returned {} rows in {:?}", result.len(), execution_time);

        let columns: Vec<ColumnInfo> = result
            .first()
            .map(|first_row| {
                first_row
                    .columns()
                    .iter()
                    .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                    .collect()
            })
            .unwrap_or_default();

        let rows: Vec<Row> = result.iter().map(convert_row).collect();

        Ok(QueryResult::with_data(columns, rows).with_execution_time(execution_time))
    }

    async fn introspect_table(&self) -> Result<Table> {
        let mut conn = self.connect().await?;

        let pragma = format!("PRAGMA table_info({})", quote_identifier(&self.table));
        let fetched: std::result::Result<Vec<(i64, String, String, i64, Option<String>, i64)>, _> =
            sqlx::query_as(&pragma).fetch_all(&mut conn).await;

        if let Err(e) = conn.close().await {
            warn!("Failed to close store connection: {e}");
        }

        let rows = fetched.map_err(|e| {
            QueryGateError::execution(format!(
                "Failed to describe table {}: {}",
                self.table,
                format_query_error(e)
            ))
        })?;

        if rows.is_empty() {
            return Err(QueryGateError::data_source(format!(
                "Table '{}' not found in {}",
                self.table,
                self.path.display()
            )));
        }

        let mut table = Table::new(self.table.clone());
        let mut keyed: Vec<(i64, String)> = Vec::new();

        for (_cid, name, data_type, not_null, _default, pk) in rows {
            if pk > 0 {
                keyed.push((pk, name.clone()));
            }
            table.columns.push(Column {
                name,
                data_type,
                is_nullable: not_null == 0,
            });
        }

        keyed.sort();
        table.primary_key = keyed.into_iter().map(|(_, name)| name).collect();

        Ok(table)
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

/// Converts a single value, dispatching on its runtime storage class.
///
/// SQLite is dynamically typed, so the declared column type is not reliable
/// for computed columns such as `COUNT(*)` or `AVG(balance)`.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let storage_class = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_uppercase(),
        Err(_) => return Value::Null,
    };

    match storage_class.as_str() {
        "INTEGER" | "INT" | "BIGINT" | "BOOLEAN" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" | "FLOAT" | "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::Text)
            .unwrap_or(Value::Null),
    }
}

/// Extracts the engine's own message from a sqlx error.
fn format_query_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}
