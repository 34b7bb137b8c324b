//! Table schema types for querygate.
//!
//! Describes the single table held by the store, in a form that can be
//! handed to the collaborator that writes SQL.

/// Represents the store's table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Table name.
    pub name: String,

    /// Columns in declaration order.
    pub columns: Vec<Column>,

    /// Column names that form the primary key (usually empty for loaded data).
    pub primary_key: Vec<String>,
}

impl Table {
    /// Creates a new table with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
        }
    }

    /// Formats the table for inclusion in an LLM system prompt.
    pub fn format_for_llm(&self) -> String {
        let column_lines = self
            .columns
            .iter()
            .map(|column| self.format_column_for_llm(column))
            .collect::<Vec<_>>()
            .join("");

        format!("Database Schema:\n\nTable: {}\n{}", self.name, column_lines)
    }

    fn format_column_for_llm(&self, column: &Column) -> String {
        let annotations = [
            self.primary_key.contains(&column.name).then_some("PK"),
            (!column.is_nullable).then_some("NOT NULL"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

        if annotations.is_empty() {
            format!("  - {}: {}\n", column.name, column.data_type)
        } else {
            format!(
                "  - {}: {} ({})\n",
                column.name,
                column.data_type,
                annotations.join(", ")
            )
        }
    }
}

/// Represents a column in the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Declared type (INTEGER, REAL or TEXT for loaded data).
    pub data_type: String,

    /// Whether the column accepts NULL.
    pub is_nullable: bool,
}

impl Column {
    /// Creates a nullable column with the given name and type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            is_nullable: true,
        }
    }
}
