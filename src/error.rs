use thiserror::Error;

/// Failure kinds surfaced by every fallible operation in this crate.
///
/// Each variant carries a human-readable message. Engine failures are folded
/// into the message text together with the context in which they occurred, so
/// callers never have to interpret a raw `SQLite` result code.
#[derive(Debug, Error)]
pub enum PointStoreError {
    /// Empty connection string, or the engine refused to open the session.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A buffer handed to the engine exceeds what it can bind.
    #[error("Buffer too small: {0}")]
    BufferTooSmall(String),

    /// Any other engine-side failure: missing session, prepare, bind, step,
    /// extension loading or transaction control.
    #[error("SQLite driver error: {0}")]
    DriverError(String),

    /// Cursor navigation outside the materialized rows.
    #[error("Cursor out of range: {0}")]
    OutOfRange(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PointStoreError {
    pub(crate) fn session_not_opened() -> Self {
        PointStoreError::DriverError("session not opened".into())
    }

    /// Whether this error came from the connection phase.
    #[must_use]
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, PointStoreError::ConnectionFailed(_))
    }
}

impl From<serde_json::Error> for PointStoreError {
    fn from(err: serde_json::Error) -> Self {
        PointStoreError::ConfigError(format!("invalid sqlite options: {err}"))
    }
}
