//! Dataset bootstrap for querygate.
//!
//! Materializes a CSV source file into a single-table SQLite store on first
//! run. An existing store is trusted as-is and never rebuilt, even if the
//! source has changed since.

mod source;

pub use source::{ColumnType, SourceError, SourceTable};

use crate::db::{quote_identifier, Value};
use crate::error::{QueryGateError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use sqlx::Connection;
use std::path::Path;
use tracing::{info, warn};

/// What `ensure_store` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// A store was already present and left untouched.
    Existing,
    /// A new store was built from the source.
    Created {
        /// Number of records loaded.
        rows: usize,
    },
}

/// Ensures a store exists at `store_path`, building it from `source_path` if absent.
///
/// The source is read fully before the store file is created, so a missing
/// or malformed source never leaves an empty store behind.
pub async fn ensure_store(
    source_path: &Path,
    store_path: &Path,
    table_name: &str,
) -> Result<StoreStatus> {
    if store_path.exists() {
        info!("Using existing store at {}", store_path.display());
        return Ok(StoreStatus::Existing);
    }

    let source = SourceTable::read(source_path)?;
    info!(
        "Loaded {} records with {} columns from {}",
        source.rows.len(),
        source.columns.len(),
        source_path.display()
    );

    ensure_parent_dirs(store_path)?;

    if let Err(e) = write_store(&source, store_path, table_name).await {
        if let Err(remove_err) = std::fs::remove_file(store_path) {
            warn!(
                "Failed to remove partial store {}: {remove_err}",
                store_path.display()
            );
        }
        return Err(e);
    }

    info!(
        "Created table '{}' in {} ({} rows)",
        table_name,
        store_path.display(),
        source.rows.len()
    );

    Ok(StoreStatus::Created {
        rows: source.rows.len(),
    })
}

/// Ensures parent directories exist for the store path.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            QueryGateError::data_source(format!(
                "Failed to create store directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Replaces `table_name` in a new store with the contents of `source`.
async fn write_store(source: &SourceTable, store_path: &Path, table_name: &str) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(store_path)
        .journal_mode(SqliteJournalMode::Delete)
        .create_if_missing(true);

    let mut conn = SqliteConnection::connect_with(&options)
        .await
        .map_err(|e| QueryGateError::data_source(format!("Failed to create store: {e}")))?;

    let table = quote_identifier(table_name);
    let column_defs = source
        .columns
        .iter()
        .map(|(name, column_type)| format!("{} {}", quote_identifier(name), column_type.sql_name()))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; source.columns.len()].join(", ");
    let insert_sql = format!("INSERT INTO {table} VALUES ({placeholders})");

    let mut tx = conn
        .begin()
        .await
        .map_err(|e| QueryGateError::data_source(format!("Failed to begin load: {e}")))?;

    sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
        .execute(&mut *tx)
        .await
        .map_err(|e| QueryGateError::data_source(format!("Failed to drop table: {e}")))?;

    sqlx::query(&format!("CREATE TABLE {table} ({column_defs})"))
        .execute(&mut *tx)
        .await
        .map_err(|e| QueryGateError::data_source(format!("Failed to create table: {e}")))?;

    for (line, row) in source.rows.iter().enumerate() {
        let mut query = sqlx::query(&insert_sql);
        for value in row {
            query = match value {
                Value::Int(i) => query.bind(*i),
                Value::Float(f) => query.bind(*f),
                Value::Text(s) => query.bind(s.as_str()),
                Value::Bytes(b) => query.bind(b.as_slice()),
                Value::Null => query.bind(None::<String>),
            };
        }
        query.execute(&mut *tx).await.map_err(|e| {
            QueryGateError::data_source(format!("Failed to insert record {}: {e}", line + 1))
        })?;
    }

    tx.commit()
        .await
        .map_err(|e| QueryGateError::data_source(format!("Failed to commit load: {e}")))?;

    conn.close()
        .await
        .map_err(|e| QueryGateError::data_source(format!("Failed to close store: {e}")))?;

    Ok(())
}
