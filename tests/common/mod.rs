#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pointstore_sqlite::prelude::*;
use tempfile::TempDir;
use tracing::Level;

/// Sink that keeps every line it receives.
#[derive(Default)]
pub struct CaptureLog {
    lines: Mutex<Vec<(Level, String)>>,
}

impl CaptureLog {
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogSink for CaptureLog {
    fn log(&self, level: Level, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

/// Temp directory holding one database file; removed on drop.
pub struct TestDb {
    _dir: TempDir,
    path: PathBuf,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(format!("{name}.sqlite"));
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self, write: bool) -> SqliteOptions {
        SqliteOptions::builder(self.path.to_string_lossy())
            .write(write)
            .without_spatial_extension()
            .finish()
    }

    pub fn open(&self, write: bool) -> Result<Connection, PointStoreError> {
        Connection::open(self.options(write), Arc::new(TracingLog))
    }
}

pub fn count_rows(conn: &mut Connection, table: &str) -> Result<i64, PointStoreError> {
    conn.query(&format!("SELECT COUNT(*) AS n FROM {table}"))?;
    let count = conn.current()?[0].parse::<i64>().ok_or_else(|| {
        PointStoreError::DriverError(format!("count on {table} did not return an integer"))
    })?;
    Ok(count)
}
