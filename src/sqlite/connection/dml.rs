use super::Connection;
use crate::error::PointStoreError;
use crate::results::Row;
use crate::sqlite::params::check_bind_size;

impl Connection {
    /// Bind and step `sql` once per row.
    ///
    /// The statement is prepared once. Column count comes from the first row;
    /// every row must be at least that wide. Nulls bind as NULL, blobs bind
    /// borrowed from `rows`, text is copied by the engine at bind time.
    /// Statements that produce a row on step (`INSERT ... RETURNING`) count as
    /// success. An empty `rows` is a no-op.
    ///
    /// Use [`Connection::begin`]/[`Connection::commit`] around large batches;
    /// outside a transaction every row commits on its own.
    ///
    /// # Errors
    /// Returns `PointStoreError::DriverError` if no session is open, or if
    /// preparing, binding or stepping fails, and
    /// `PointStoreError::BufferTooSmall` for a value the engine cannot bind.
    pub fn insert(&mut self, sql: &str, rows: &[Row]) -> Result<bool, PointStoreError> {
        let session = self.session()?;
        let Some(first) = rows.first() else {
            return Ok(true);
        };
        let width = first.len();

        let mut stmt = session.prepare(sql).map_err(|e| {
            PointStoreError::DriverError(format!("insert prepare failed: {e}"))
        })?;

        for (r, row) in rows.iter().enumerate() {
            for pos in 0..width {
                let bind_failed = |detail: String| {
                    PointStoreError::DriverError(format!(
                        "failure to bind row number '{r}' at position number '{pos}': {detail}"
                    ))
                };
                let value = row
                    .get(pos)
                    .ok_or_else(|| bind_failed(format!("row has only {} columns", row.len())))?;
                check_bind_size(value, r, pos)?;
                stmt.raw_bind_parameter(pos + 1, value)
                    .map_err(|e| bind_failed(e.to_string()))?;
            }

            match stmt.raw_execute() {
                Ok(_) | Err(rusqlite::Error::ExecuteReturnedResults) => {}
                Err(e) => {
                    return Err(PointStoreError::DriverError(format!("insert failure: {e}")));
                }
            }
        }

        tracing::debug!(rows = rows.len(), columns = width, "sqlite insert completed");
        Ok(true)
    }
}
