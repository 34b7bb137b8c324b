//! The query gateway.
//!
//! Accepts arbitrary SQL text, applies the read-only policy, runs the
//! statement against the store and renders the outcome. `execute` is total:
//! every failure becomes part of the returned string.

use std::sync::Arc;

use tracing::{debug, info};

use super::render::render_table;
use crate::db::QueryEngine;
use crate::error::{QueryGateError, Result};
use crate::safety::{check_read_only, ensure_single_statement};

/// Returned when a valid statement matches no rows.
pub const NO_RESULTS: &str = "No results found.";

/// Safety-checked SQL execution over a single store.
///
/// Holds no per-call state; clones share the same engine.
#[derive(Clone)]
pub struct QueryGateway {
    engine: Arc<dyn QueryEngine>,
}

impl QueryGateway {
    /// Creates a gateway over the given engine.
    pub fn new(engine: Arc<dyn QueryEngine>) -> Self {
        Self { engine }
    }

    /// Executes `sql` and returns the rendered result or a rendered error.
    ///
    /// The returned string is exactly one of: `No valid SQL to execute.`,
    /// `Only SELECT queries are allowed.`, `No results found.`, a text table,
    /// or `SQL Execution Error: <engine message>`.
    pub async fn execute(&self, sql: &str) -> String {
        let rendered = match self.try_execute(sql).await {
            Ok(output) => output,
            Err(e) => error_response(e),
        };

        info!("[SQL GENERATED]:\n{sql}");
        info!("[SQL RESULT]:\n{rendered}");

        rendered
    }

    /// Executes `sql`, keeping failures as typed errors.
    pub async fn try_execute(&self, sql: &str) -> Result<String> {
        let kind = check_read_only(sql)?;
        ensure_single_statement(sql)?;

        let result = self.engine.execute_query(sql).await?;
        debug!(
            "{kind} statement returned {} rows in {:?}",
            result.row_count, result.execution_time
        );

        if result.is_empty() {
            Ok(NO_RESULTS.to_string())
        } else {
            Ok(render_table(&result))
        }
    }

    /// Describes the store's table for the collaborator's prompt.
    pub async fn describe(&self) -> Result<String> {
        let table = self.engine.introspect_table().await?;
        Ok(table.format_for_llm())
    }
}

/// Converts an error into the caller-facing string.
fn error_response(error: QueryGateError) -> String {
    match error {
        QueryGateError::InvalidQuery(rejection) => rejection.message().to_string(),
        QueryGateError::Execution(_) => error.to_string(),
        other => QueryGateError::execution(other.to_string()).to_string(),
    }
}
