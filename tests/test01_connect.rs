mod common;

use std::sync::Arc;

use common::TestDb;
use pointstore_sqlite::prelude::*;

#[test]
fn empty_connection_string_is_rejected() {
    let mut conn = Connection::new("", Arc::new(TracingLog));
    for write in [false, true] {
        let err = conn.connect(write).unwrap_err();
        assert!(matches!(err, PointStoreError::ConnectionFailed(_)), "{err}");
        assert!(err.to_string().contains("no connection string"));
        assert!(!conn.is_open());
    }
}

#[test]
fn read_only_open_of_missing_file_fails() {
    let db = TestDb::new("missing");
    let err = db.open(false).unwrap_err();
    assert!(err.is_connection_failure(), "{err}");
    assert!(!db.path().exists());
}

#[test]
fn write_open_creates_file() -> Result<(), Box<dyn std::error::Error>> {
    let db = TestDb::new("fresh");
    let conn = db.open(true)?;
    assert!(conn.is_open());
    assert_eq!(conn.connection_string(), db.path().to_string_lossy());
    assert!(db.path().exists());
    Ok(())
}

#[test]
fn read_only_session_refuses_writes() -> Result<(), Box<dyn std::error::Error>> {
    let db = TestDb::new("readonly");
    {
        let mut conn = db.open(true)?;
        conn.execute("CREATE TABLE t (a TEXT)", "unable to create table")?;
    }

    let mut conn = db.open(false)?;
    let err = conn
        .execute("INSERT INTO t VALUES ('x')", "unable to insert")
        .unwrap_err();
    assert!(matches!(err, PointStoreError::DriverError(_)));
    assert!(err.to_string().contains("unable to insert 'INSERT INTO t VALUES ('x')'"));
    Ok(())
}

#[test]
fn close_is_idempotent_and_blocks_further_work() -> Result<(), Box<dyn std::error::Error>> {
    let db = TestDb::new("close");
    let mut conn = db.open(true)?;
    conn.close();
    conn.close();
    assert!(!conn.is_open());

    let err = conn.execute("SELECT 1", "unused").unwrap_err();
    assert!(err.to_string().contains("session not opened"), "{err}");
    assert!(conn.query("SELECT 1").is_err());
    assert!(conn.insert("INSERT INTO t VALUES (?)", &[row!["x"]]).is_err());
    assert!(conn.last_row_id().is_err());
    Ok(())
}

#[test]
fn reconnect_after_close() -> Result<(), Box<dyn std::error::Error>> {
    let db = TestDb::new("reconnect");
    let mut conn = Connection::with_options(db.options(true), Arc::new(TracingLog));
    conn.connect(true)?;
    conn.execute("CREATE TABLE t (a TEXT)", "unable to create table")?;
    conn.close();
    conn.connect(false)?;
    conn.query("SELECT name FROM sqlite_master WHERE type = 'table'")?;
    assert_eq!(conn.current()?[0].as_text(), Some("t"));
    Ok(())
}

#[test]
fn in_memory_database() -> Result<(), Box<dyn std::error::Error>> {
    let options = SqliteOptions::builder(":memory:")
        .write(true)
        .without_spatial_extension()
        .finish();
    let mut conn = Connection::open(options, Arc::new(TracingLog))?;
    conn.query("SELECT 1 + 1 AS two")?;
    assert_eq!(conn.column_names(), ["two"]);
    assert_eq!(conn.current()?[0].as_text(), Some("2"));
    Ok(())
}

#[test]
fn options_from_json() -> Result<(), Box<dyn std::error::Error>> {
    let db = TestDb::new("json");
    let json = serde_json::json!({
        "connection": db.path().to_string_lossy(),
        "write": true,
        "spatial_extension": null,
    });
    let options = SqliteOptions::from_json(&json.to_string())?;
    let conn = Connection::open(options, Arc::new(TracingLog))?;
    assert!(conn.is_open());
    Ok(())
}
