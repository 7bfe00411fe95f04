use super::Connection;
use crate::error::PointStoreError;
use crate::results::{RecordSet, Row};
use crate::sqlite::query::build_record_set;

impl Connection {
    /// Run `sql` and materialize every row into this connection's record set.
    ///
    /// The previous record set is discarded up front and the cursor is reset
    /// to the first row. On failure the record set is left empty.
    ///
    /// # Errors
    /// Returns `PointStoreError::DriverError` if no session is open, or if
    /// preparing or stepping the statement fails.
    pub fn query(&mut self, sql: &str) -> Result<(), PointStoreError> {
        self.records = RecordSet::default();
        self.records = self.query_records(sql)?;
        Ok(())
    }

    /// Run `sql` and hand the materialized rows to the caller, leaving this
    /// connection's own record set untouched.
    ///
    /// # Errors
    /// Same as [`Connection::query`].
    pub fn query_records(&self, sql: &str) -> Result<RecordSet, PointStoreError> {
        let session = self.session()?;
        let mut stmt = session.prepare(sql).map_err(|e| {
            PointStoreError::DriverError(format!("statement prepare failed: {e}"))
        })?;
        let record_set = build_record_set(&mut stmt)?;
        tracing::debug!(rows = record_set.len(), "sqlite query materialized");
        Ok(record_set)
    }

    /// Advance the cursor over the last query's rows.
    ///
    /// # Errors
    /// Returns `PointStoreError::OutOfRange` if the last query produced no rows.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<bool, PointStoreError> {
        self.records.next()
    }

    /// The row under the cursor.
    ///
    /// # Errors
    /// Returns `PointStoreError::OutOfRange` when there is no row there.
    pub fn current(&self) -> Result<&Row, PointStoreError> {
        self.records.current()
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        self.records.column_names()
    }

    #[must_use]
    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Move the last query's record set out of the connection.
    pub fn take_records(&mut self) -> RecordSet {
        std::mem::take(&mut self.records)
    }
}
