//! Query safety policy.
//!
//! Two guards run before a statement reaches the store:
//!
//! 1. A textual allowlist on the leading keyword (`select`, `with`, `show`,
//!    `describe`). This is a prefix check, not a parse: a statement that starts
//!    with an allowed keyword but embeds a mutating clause is not detected here.
//! 2. A single-statement check backed by sqlparser, so `SELECT 1; DROP TABLE x`
//!    never reaches an engine that would happily run both.
//!
//! The store connection is opened read-only as well, which is what actually
//! guarantees no writes.

mod parser;

pub use parser::{count_segments, count_statements, ensure_single_statement};

use crate::error::QueryRejection;
use std::fmt;

/// Leading keywords accepted by the gateway.
pub const ALLOWED_PREFIXES: [&str; 4] = ["select", "with", "show", "describe"];

/// The kind of read-style statement detected from its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    With,
    Show,
    Describe,
}

impl StatementKind {
    /// Matches the leading keyword of already-normalized SQL.
    fn from_normalized(normalized: &str) -> Option<Self> {
        ALLOWED_PREFIXES
            .iter()
            .position(|prefix| normalized.starts_with(prefix))
            .map(|i| match i {
                0 => Self::Select,
                1 => Self::With,
                2 => Self::Show,
                _ => Self::Describe,
            })
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::With => write!(f, "WITH (CTE)"),
            Self::Show => write!(f, "SHOW"),
            Self::Describe => write!(f, "DESCRIBE"),
        }
    }
}

/// Applies the emptiness and allowlist checks, in that order.
pub fn check_read_only(sql: &str) -> Result<StatementKind, QueryRejection> {
    let normalized = sql.trim().to_lowercase();

    if normalized.is_empty() {
        return Err(QueryRejection::Empty);
    }

    StatementKind::from_normalized(&normalized).ok_or(QueryRejection::NotReadOnly)
}
