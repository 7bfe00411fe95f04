use super::Connection;
use crate::error::PointStoreError;

impl Connection {
    /// Open an explicit transaction.
    ///
    /// There is no rollback helper; issue `ROLLBACK` through
    /// [`Connection::execute`] when a batch has to be abandoned. Closing the
    /// session with a transaction still open discards its changes.
    ///
    /// # Errors
    /// Returns `PointStoreError::DriverError` if the engine refuses `BEGIN`.
    pub fn begin(&mut self) -> Result<(), PointStoreError> {
        self.execute("BEGIN", "unable to begin transaction")
    }

    /// Commit the transaction opened by [`Connection::begin`].
    ///
    /// # Errors
    /// Returns `PointStoreError::DriverError` if the engine refuses `COMMIT`.
    pub fn commit(&mut self) -> Result<(), PointStoreError> {
        self.execute("COMMIT", "unable to commit transaction")
    }

    /// Whether an explicit transaction is currently open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| !session.is_autocommit())
    }
}
