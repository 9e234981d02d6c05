//! Result cursor returned by `Handle::execute`
//!
//! Rows are fully materialized before the connection lock is released, so a
//! cursor never borrows the connection and can outlive the statement that
//! produced it.

use rusqlite::types::Value;

/// A single result row: bound values in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Value at the given column index, if in range.
    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// All values in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Materialized result of a single executed statement.
///
/// For row-returning statements (`SELECT`, `PRAGMA`, `RETURNING` clauses)
/// the cursor holds the column names and every result row. For other
/// statements it holds the affected-row count instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultCursor {
    columns: Vec<String>,
    rows: Vec<Row>,
    changes: usize,
}

impl ResultCursor {
    pub(crate) fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            changes: 0,
        }
    }

    pub(crate) fn from_write(changes: usize) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            changes,
        }
    }

    /// Result column names, in statement order. Empty for non-query statements.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All result rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of result rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows affected by a non-query statement. Zero for queries.
    pub fn changes(&self) -> usize {
        self.changes
    }

    /// Value at `(row, column-name)`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Consume the cursor, yielding its rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl IntoIterator for ResultCursor {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultCursor {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
