//! Plain-text rendering of query results.
//!
//! Produces a fixed-width, whitespace-aligned table: one header line of column
//! names followed by exactly one line per row. Numeric columns are
//! right-aligned, everything else left-aligned. Nothing is truncated.
//!
//! Floats print as their shortest exact form (`25841.0`, `113810.15`), not
//! padded to a shared per-column precision; non-finite values print as `inf`
//! and `NaN`.

use crate::db::{QueryResult, Value};

/// Gap between adjacent columns.
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Left,
    Right,
}

/// Renders every row of `result` as an aligned text table.
pub fn render_table(result: &QueryResult) -> String {
    let column_count = result
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(result.columns.len()))
        .max()
        .unwrap_or(0);

    let headers: Vec<String> = (0..column_count)
        .map(|i| {
            result
                .columns
                .get(i)
                .map(|col| escape_cell(&col.name))
                .unwrap_or_default()
        })
        .collect();

    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| {
            (0..column_count)
                .map(|i| row.get(i).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    let alignments: Vec<Alignment> = (0..column_count)
        .map(|i| column_alignment(result.rows.iter().filter_map(|row| row.get(i))))
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    std::iter::once(&headers)
        .chain(cells.iter())
        .map(|line| format_line(line, &widths, &alignments))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A column is numeric when it has at least one value and no non-NULL text.
fn column_alignment<'a>(values: impl Iterator<Item = &'a Value>) -> Alignment {
    let mut saw_number = false;
    for value in values {
        match value {
            Value::Null => {}
            v if v.is_numeric() => saw_number = true,
            _ => return Alignment::Left,
        }
    }
    if saw_number {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

fn cell_text(value: &Value) -> String {
    escape_cell(&value.to_display_string())
}

/// Keeps each row on a single line.
fn escape_cell(text: &str) -> String {
    text.replace('\r', "\\r")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
}

fn format_line(cells: &[String], widths: &[usize], alignments: &[Alignment]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .zip(alignments)
        .map(|((cell, &width), alignment)| match alignment {
            Alignment::Left => format!("{cell:<width$}"),
            Alignment::Right => format!("{cell:>width$}"),
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}
