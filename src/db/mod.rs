//! Store abstraction layer for querygate.
//!
//! Provides a trait-based interface for running queries against the store,
//! so the gateway can be exercised against a mock engine in tests.

mod mock;
mod schema;
mod sqlite;
mod types;

pub use mock::{FailingQueryEngine, MockQueryEngine};
pub use schema::{Column, Table};
pub use sqlite::SqliteStore;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface the gateway needs from a store.
///
/// Implementations must not keep per-call state: every call stands alone.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Executes a single SQL statement and returns the full result set.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Describes the store's table.
    async fn introspect_table(&self) -> Result<Table>;
}

/// Quotes an identifier for interpolation into SQLite statements.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
