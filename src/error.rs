//! Error types for querygate.
//!
//! Defines the main error enum used throughout the crate. The gateway converts
//! these to plain strings at its boundary; everything below it propagates them.

use thiserror::Error;

/// Reasons a query is refused before it reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRejection {
    /// Empty or whitespace-only input.
    Empty,
    /// Input does not start with an allowed read-style keyword.
    NotReadOnly,
}

impl QueryRejection {
    /// Returns the advisory text shown to the caller.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "No valid SQL to execute.",
            Self::NotReadOnly => "Only SELECT queries are allowed.",
        }
    }
}

impl std::fmt::Display for QueryRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Main error type for querygate operations.
#[derive(Error, Debug)]
pub enum QueryGateError {
    /// Source file missing, unreadable or malformed while building the store.
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Query refused by the read-only policy; never reaches the engine.
    #[error("{0}")]
    InvalidQuery(QueryRejection),

    /// The engine rejected or failed the statement.
    #[error("SQL Execution Error: {0}")]
    Execution(String),

    /// Configuration errors (invalid config file, bad table name, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QueryGateError {
    /// Creates a data source error with the given message.
    pub fn data_source(msg: impl Into<String>) -> Self {
        Self::DataSource(msg.into())
    }

    /// Creates an execution error with the given engine message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::DataSource(_) => "Data Source Error",
            Self::InvalidQuery(_) => "Invalid Query",
            Self::Execution(_) => "Execution Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

impl From<QueryRejection> for QueryGateError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection)
    }
}

/// Result type alias using QueryGateError.
pub type Result<T> = std::result::Result<T, QueryGateError>;
