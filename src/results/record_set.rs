use std::sync::Arc;

use super::Row;
use crate::error::PointStoreError;
use crate::types::ColumnValue;

/// The full, eagerly materialized result of one query.
///
/// A `RecordSet` holds no engine resources. The cursor starts on the first
/// row; [`RecordSet::next`] moves it forward and [`RecordSet::current`] reads
/// the row underneath it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    /// Column names shared by all rows, in declared statement order
    column_names: Arc<Vec<String>>,
    rows: Vec<Row>,
    position: usize,
}

impl RecordSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record set with room for `capacity` rows.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RecordSet {
            column_names: Arc::new(Vec::new()),
            rows: Vec::with_capacity(capacity),
            position: 0,
        }
    }

    /// Build a record set from already assembled parts.
    #[must_use]
    pub fn from_parts(column_names: Vec<String>, rows: Vec<Row>) -> Self {
        RecordSet {
            column_names: Arc::new(column_names),
            rows,
            position: 0,
        }
    }

    pub fn set_column_names(&mut self, column_names: Vec<String>) {
        self.column_names = Arc::new(column_names);
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Zero-based cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor back to the first row.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    #[must_use]
    pub fn column_index(&self, column_name: &str) -> Option<usize> {
        self.column_names.iter().position(|col| col == column_name)
    }

    /// Advance the cursor by one row.
    ///
    /// Returns whether the cursor still points at a row. On a set of N rows
    /// this yields `true` N-1 times and `false` from then on; the cursor stops
    /// one past the last row.
    ///
    /// # Errors
    /// Returns `PointStoreError::OutOfRange` if the set has no rows at all.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<bool, PointStoreError> {
        if self.rows.is_empty() {
            return Err(PointStoreError::OutOfRange(
                "cannot advance cursor over an empty record set".into(),
            ));
        }
        if self.position < self.rows.len() {
            self.position += 1;
        }
        Ok(self.position < self.rows.len())
    }

    /// The row under the cursor.
    ///
    /// # Errors
    /// Returns `PointStoreError::OutOfRange` if the set is empty or the cursor
    /// has moved past the last row.
    pub fn current(&self) -> Result<&Row, PointStoreError> {
        self.rows.get(self.position).ok_or_else(|| {
            PointStoreError::OutOfRange(format!(
                "cursor position {} outside {} rows",
                self.position,
                self.rows.len()
            ))
        })
    }

    /// Value of the named column in the row under the cursor.
    ///
    /// # Errors
    /// Returns `PointStoreError::OutOfRange` if the cursor is not on a row.
    pub fn value(&self, column_name: &str) -> Result<Option<&ColumnValue>, PointStoreError> {
        let row = self.current()?;
        Ok(self.column_index(column_name).and_then(|idx| row.get(idx)))
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
