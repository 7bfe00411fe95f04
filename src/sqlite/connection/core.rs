use std::fmt;
use std::sync::Arc;

use rusqlite::OpenFlags;
use tracing::Level;

use crate::diagnostics::{self, LogSink, SinkToken};
use crate::error::PointStoreError;
use crate::results::RecordSet;
use crate::sqlite::config::SqliteOptions;
use crate::sqlite::extension;

/// One `SQLite` session plus the record set of its most recent query.
///
/// Every call blocks until the engine returns. A connection is `Send` but
/// not `Sync`; callers sharing one across threads must serialize access.
pub struct Connection {
    pub(crate) session: Option<rusqlite::Connection>,
    pub(crate) options: SqliteOptions,
    pub(crate) records: RecordSet,
    log: Arc<dyn LogSink>,
    sink_token: SinkToken,
}

impl Connection {
    /// Create an unopened connection with default options.
    ///
    /// No I/O happens here; an empty `connection` is only rejected by
    /// [`Connection::connect`].
    #[must_use]
    pub fn new(connection: impl Into<String>, log: Arc<dyn LogSink>) -> Self {
        Self::with_options(SqliteOptions::new(connection), log)
    }

    #[must_use]
    pub fn with_options(options: SqliteOptions, log: Arc<dyn LogSink>) -> Self {
        diagnostics::install_bridge();
        let sink_token = diagnostics::register(Arc::clone(&log));
        Self {
            session: None,
            options,
            records: RecordSet::default(),
            log,
            sink_token,
        }
    }

    /// Construct and connect in one go, honouring `options.write`.
    ///
    /// # Errors
    /// Propagates any failure from [`Connection::connect`].
    pub fn open(options: SqliteOptions, log: Arc<dyn LogSink>) -> Result<Self, PointStoreError> {
        let write = options.write;
        let mut conn = Self::with_options(options, log);
        conn.connect(write)?;
        Ok(conn)
    }

    /// Open the session and run the configured extension bootstrap.
    ///
    /// `write` opens read/write and creates the database when missing;
    /// otherwise the session is read-only. An already open session is closed
    /// first.
    ///
    /// # Errors
    /// Returns `PointStoreError::ConnectionFailed` for an empty connection
    /// string or when the engine cannot open the database. Bootstrap failures
    /// are propagated unchanged and leave the connection closed.
    pub fn connect(&mut self, write: bool) -> Result<(), PointStoreError> {
        if self.options.connection.is_empty() {
            return Err(PointStoreError::ConnectionFailed(
                "unable to connect to sqlite3 database, no connection string was given".into(),
            ));
        }
        self.close();

        let mut flags = OpenFlags::SQLITE_OPEN_NO_MUTEX | OpenFlags::SQLITE_OPEN_URI;
        if write {
            flags |= OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
        } else {
            flags |= OpenFlags::SQLITE_OPEN_READ_ONLY;
        }

        let session =
            rusqlite::Connection::open_with_flags(&self.options.connection, flags).map_err(|e| {
                PointStoreError::ConnectionFailed(format!(
                    "unable to connect to database sqlite error: {e}"
                ))
            })?;
        self.session = Some(session);
        self.log.log(
            Level::DEBUG,
            &format!(
                "sqlite session opened: {} (write: {write})",
                self.options.connection
            ),
        );

        if let Some(ext) = self.options.spatial_extension.clone() {
            if let Err(e) = extension::bootstrap(self, &ext) {
                self.close();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Finalize outstanding statements and close the session.
    ///
    /// Safe to call repeatedly. A close failure is logged and the handle is
    /// dropped regardless.
    pub fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        match session.close() {
            Ok(()) => self.log.log(
                Level::DEBUG,
                &format!("sqlite session closed: {}", self.options.connection),
            ),
            Err((session, e)) => {
                self.log.log(
                    Level::WARN,
                    &format!(
                        "sqlite close failed, dropping handle: {}: {e}",
                        self.options.connection
                    ),
                );
                drop(session);
            }
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.options.connection
    }

    #[must_use]
    pub fn options(&self) -> &SqliteOptions {
        &self.options
    }

    /// The sink this connection reports lifecycle lines and engine
    /// diagnostics to.
    #[must_use]
    pub fn log(&self) -> &Arc<dyn LogSink> {
        &self.log
    }

    pub(crate) fn session(&self) -> Result<&rusqlite::Connection, PointStoreError> {
        self.session
            .as_ref()
            .ok_or_else(PointStoreError::session_not_opened)
    }

    /// Run `sql` to completion without capturing rows.
    ///
    /// The text may contain several `;`-separated statements.
    ///
    /// # Errors
    /// Returns `PointStoreError::DriverError` when no session is open, or with
    /// `context` and the offending SQL when the engine reports a failure.
    pub fn execute(&mut self, sql: &str, context: &str) -> Result<(), PointStoreError> {
        self.session()?
            .execute_batch(sql)
            .map_err(|e| PointStoreError::DriverError(format!("{context} '{sql}': {e}")))
    }

    /// Row id generated by the most recent successful insert on this session.
    ///
    /// # Errors
    /// Returns `PointStoreError::DriverError` when no session is open.
    pub fn last_row_id(&self) -> Result<i64, PointStoreError> {
        Ok(self.session()?.last_insert_rowid())
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
        diagnostics::unregister(self.sink_token);
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("options", &self.options)
            .field("open", &self.session.is_some())
            .field("rows", &self.records.len())
            .finish_non_exhaustive()
    }
}
