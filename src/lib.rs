//! Synchronous `SQLite` connection and record-set layer for point-cloud
//! pipeline stages.
//!
//! A [`Connection`] owns one session. Raw statements run through
//! [`Connection::execute`], queries are materialized eagerly into a
//! [`RecordSet`] navigated with a cursor, and [`Connection::insert`] binds a
//! batch of [`Row`]s against one prepared statement. A spatial extension is
//! loaded and initialized after every connect unless disabled in
//! [`SqliteOptions`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pointstore_sqlite::prelude::*;
//!
//! # fn main() -> Result<(), PointStoreError> {
//! let options = SqliteOptions::builder("points.sqlite")
//!     .write(true)
//!     .without_spatial_extension()
//!     .finish();
//! let mut conn = Connection::open(options, Arc::new(TracingLog))?;
//! conn.execute("CREATE TABLE IF NOT EXISTS t (a TEXT, b INTEGER)", "unable to create table")?;
//! conn.begin()?;
//! conn.insert("INSERT INTO t VALUES (?, ?)", &[row!["a", 42]])?;
//! conn.commit()?;
//! conn.query("SELECT a, b FROM t")?;
//! assert_eq!(conn.current()?[1].as_text(), Some("42"));
//! # Ok(())
//! # }
//! ```

pub mod diagnostics;
pub mod error;
mod macros;
pub mod prelude;
pub mod results;
pub mod sqlite;
pub mod types;

pub use diagnostics::{LogSink, TracingLog};
pub use error::PointStoreError;
pub use results::{RecordSet, Row};
pub use sqlite::{Connection, SpatialExtension, SqliteOptions, SqliteOptionsBuilder};
pub use types::ColumnValue;
