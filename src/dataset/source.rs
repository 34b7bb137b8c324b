//! CSV source reading and column type inference.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::db::Value;
use crate::error::{QueryGateError, Result};

/// Errors that can occur while reading the source file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Failed to open file
    #[error("Failed to open file: {0}")]
    FileOpen(#[from] std::io::Error),
    /// Header row could not be read
    #[error("Failed to read header row: {0}")]
    Header(#[source] csv::Error),
    /// File has no header row
    #[error("Source has no header row")]
    MissingHeader,
    /// A header field is blank (1-based position)
    #[error("Header column {0} has no name")]
    UnnamedColumn(usize),
    /// Two header fields differ only by case
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),
    /// Failed to parse a record
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] csv::Error),
}

/// Storage type inferred for a source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    /// Returns the SQLite type name used in `CREATE TABLE`.
    pub fn sql_name(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
        }
    }

    /// Infers the narrowest type that fits every non-empty field.
    ///
    /// A column with no non-empty fields at all is text.
    fn infer<'a>(fields: impl Iterator<Item = &'a str> + Clone) -> Self {
        let mut present = fields.filter(|f| !f.is_empty()).peekable();
        if present.peek().is_none() {
            return Self::Text;
        }

        if present.clone().all(|f| f.trim().parse::<i64>().is_ok()) {
            Self::Integer
        } else if present.all(|f| f.trim().parse::<f64>().is_ok()) {
            Self::Real
        } else {
            Self::Text
        }
    }

    /// Converts a raw field to a typed value; empty fields become NULL.
    fn convert(&self, field: &str) -> Value {
        if field.is_empty() {
            return Value::Null;
        }
        match self {
            Self::Integer => field
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .unwrap_or(Value::Null),
            Self::Real => field
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .unwrap_or(Value::Null),
            Self::Text => Value::Text(field.to_string()),
        }
    }
}

/// A CSV file fully materialized in memory.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    /// Header names with their inferred types, in file order.
    pub columns: Vec<(String, ColumnType)>,

    /// Typed records, one per CSV data row.
    pub rows: Vec<Vec<Value>>,
}

impl SourceTable {
    /// Reads and types the whole CSV file at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        File::open(path)
            .map_err(SourceError::from)
            .and_then(|file| Self::from_reader(BufReader::new(file)))
            .map_err(|e| QueryGateError::data_source(format!("{}: {e}", path.display())))
    }

    /// Reads and types CSV text from any reader.
    pub fn from_reader(reader: impl Read) -> std::result::Result<Self, SourceError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(SourceError::Header)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(SourceError::MissingHeader);
        }
        if let Some(position) = headers.iter().position(String::is_empty) {
            return Err(SourceError::UnnamedColumn(position + 1));
        }
        for (i, name) in headers.iter().enumerate() {
            if headers[..i].iter().any(|prior| prior.eq_ignore_ascii_case(name)) {
                return Err(SourceError::DuplicateColumn(name.clone()));
            }
        }

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            raw_rows.push(record.iter().map(str::to_string).collect());
        }

        let columns: Vec<(String, ColumnType)> = headers
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let column_type = ColumnType::infer(raw_rows.iter().map(move |r| r[i].as_str()));
                (name, column_type)
            })
            .collect();

        let rows = raw_rows
            .iter()
            .map(|raw| {
                raw.iter()
                    .zip(&columns)
                    .map(|(field, (_, column_type))| column_type.convert(field))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }
}
