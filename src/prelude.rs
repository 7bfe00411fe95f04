//! Convenient imports for common functionality.
//!
//! ```rust
//! use pointstore_sqlite::prelude::*;
//! ```

pub use crate::diagnostics::{LogSink, TracingLog};
pub use crate::error::PointStoreError;
pub use crate::results::{RecordSet, Row};
pub use crate::sqlite::{Connection, SpatialExtension, SqliteOptions, SqliteOptionsBuilder};
pub use crate::types::ColumnValue;
pub use crate::row;
