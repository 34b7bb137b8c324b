//! Mock query engines for testing.
//!
//! Provide in-memory stand-ins for the store so the gateway can be tested
//! without touching the filesystem.

use super::{Column, ColumnInfo, QueryEngine, QueryResult, Row, Table};
use crate::error::{QueryGateError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A mock engine that returns a fixed result and records every statement it sees.
#[derive(Default)]
pub struct MockQueryEngine {
    result: QueryResult,
    executed: Mutex<Vec<String>>,
}

impl MockQueryEngine {
    /// Creates a mock engine that returns an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock engine that returns the given columns and rows.
    pub fn with_rows(columns: Vec<ColumnInfo>, rows: Vec<Row>) -> Self {
        Self {
            result: QueryResult::with_data(columns, rows),
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Returns every statement passed to `execute_query`, in call order.
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|sqls| sqls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl QueryEngine for MockQueryEngine {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        self.executed
            .lock()
            .map_err(|_| QueryGateError::internal("mock engine lock poisoned"))?
            .push(sql.to_string());
        Ok(self.result.clone())
    }

    async fn introspect_table(&self) -> Result<Table> {
        let mut table = Table::new("customers");
        table.columns = self
            .result
            .columns
            .iter()
            .map(|col| Column::new(col.name.clone(), col.data_type.clone()))
            .collect();
        Ok(table)
    }
}

/// A mock engine whose every call fails with the given engine message.
pub struct FailingQueryEngine {
    message: String,
    calls: AtomicUsize,
}

impl FailingQueryEngine {
    /// Creates a failing engine reporting `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns how many times the engine was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryEngine for FailingQueryEngine {
    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(QueryGateError::execution(self.message.clone()))
    }

    async fn introspect_table(&self) -> Result<Table> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(QueryGateError::execution(self.message.clone()))
    }
}
