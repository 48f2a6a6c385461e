/*!
 * Scrollable, read-only result of a query.
 *
 * The gateway drains a statement into a `RowCursor` before the statement is
 * released, so the cursor owns its rows and can move in both directions.
 * Positions follow the usual scrollable-cursor convention: 0 is before the
 * first row, 1..=len are rows, len + 1 is after the last row.
 */

use rusqlite::types::{FromSql, Value, ValueRef};
use rusqlite::Rows;

use crate::errors::LibraryError;

/// Materialized rows with a movable position
#[derive(Debug, Clone, PartialEq)]
pub struct RowCursor {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    position: usize,
}

impl RowCursor {
    /// Build a cursor from column names and row values
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            position: 0,
        }
    }

    /// Drain rusqlite rows into a cursor
    pub(crate) fn drain(columns: Vec<String>, mut rows: Rows<'_>) -> Result<Self, LibraryError> {
        let width = columns.len();
        let mut values = Vec::new();

        while let Some(row) = rows.next()? {
            let mut record = Vec::with_capacity(width);
            for index in 0..width {
                record.push(row.get::<_, Value>(index)?);
            }
            values.push(record);
        }

        Ok(Self::new(columns, values))
    }

    /// Column names in select order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Current position, 0 before the first row
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the cursor sits on a row
    pub fn on_row(&self) -> bool {
        self.position >= 1 && self.position <= self.rows.len()
    }

    /// Advance one row
    pub fn next(&mut self) -> bool {
        if self.position <= self.rows.len() {
            self.position += 1;
        }
        self.on_row()
    }

    /// Step back one row
    pub fn previous(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
        }
        self.on_row()
    }

    pub fn first(&mut self) -> bool {
        self.absolute(1)
    }

    pub fn last(&mut self) -> bool {
        self.absolute(self.rows.len())
    }

    /// Move to a 1-based row; out of range parks the cursor after the last row
    pub fn absolute(&mut self, row: usize) -> bool {
        self.position = if row == 0 {
            0
        } else {
            row.min(self.rows.len() + 1)
        };
        self.on_row()
    }

    pub fn before_first(&mut self) {
        self.position = 0;
    }

    pub fn after_last(&mut self) {
        self.position = self.rows.len() + 1;
    }

    /// Raw values of the current row
    pub fn current(&self) -> Result<&[Value], LibraryError> {
        if !self.on_row() {
            return Err(LibraryError::NoCurrentRow);
        }
        Ok(&self.rows[self.position - 1])
    }

    /// Read a column of the current row by 0-based index
    pub fn get<T: FromSql>(&self, column: usize) -> Result<T, LibraryError> {
        let row = self.current()?;
        let value = row.get(column).ok_or_else(|| LibraryError::Conversion {
            column,
            message: format!("index out of range, row has {} columns", row.len()),
        })?;

        T::column_result(ValueRef::from(value)).map_err(|e| LibraryError::Conversion {
            column,
            message: e.to_string(),
        })
    }

    /// Read a column of the current row by name (case-insensitive)
    pub fn get_by_name<T: FromSql>(&self, name: &str) -> Result<T, LibraryError> {
        let column = self
            .columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| LibraryError::UnknownColumn(name.to_string()))?;
        self.get(column)
    }
}
