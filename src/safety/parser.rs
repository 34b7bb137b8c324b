//! Statement counting with sqlparser.
//!
//! Uses sqlparser-rs with the SQLite dialect to find how many statements a
//! string holds. SQLite's own multi-statement execution is never relied on.
//!
//! The parser rejects some valid SQLite syntax (`NOTNULL`, `GLOB`, ...). For
//! such input the tokenizer, which accepts far more, splits on `;` instead.

use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Token, Tokenizer};
use tracing::debug;

use crate::error::{QueryGateError, Result};

/// Returns the number of statements in `sql`, or `None` if it cannot be parsed.
///
/// Unparseable input is left for the engine to reject with its own message.
pub fn count_statements(sql: &str) -> Option<usize> {
    match Parser::parse_sql(&SQLiteDialect {}, sql) {
        Ok(statements) => Some(statements.len()),
        Err(e) => {
            debug!("sqlparser could not parse statement: {e}");
            None
        }
    }
}

/// Counts `;`-separated segments that hold more than whitespace and comments.
///
/// Semicolons inside string literals and quoted identifiers are not
/// separators. If even tokenizing fails, every `;` counts.
pub fn count_segments(sql: &str) -> usize {
    match Tokenizer::new(&SQLiteDialect {}, sql).tokenize() {
        Ok(tokens) => tokens
            .split(|token| matches!(token, Token::SemiColon))
            .filter(|segment| {
                segment
                    .iter()
                    .any(|token| !matches!(token, Token::Whitespace(_)))
            })
            .count(),
        Err(e) => {
            debug!("sqlparser could not tokenize statement: {e}");
            sql.split(';').filter(|part| !part.trim().is_empty()).count()
        }
    }
}

/// Fails when `sql` holds more than one statement.
pub fn ensure_single_statement(sql: &str) -> Result<()> {
    let count = count_statements(sql).unwrap_or_else(|| count_segments(sql));
    if count > 1 {
        return Err(QueryGateError::execution(format!(
            "multiple statements are not allowed (found {count})"
        )));
    }
    Ok(())
}
