mod common;

use common::{TestDb, count_rows};
use pointstore_sqlite::prelude::*;

fn create_points(conn: &mut Connection) -> Result<(), PointStoreError> {
    conn.execute(
        "CREATE TABLE points (id INTEGER PRIMARY KEY, x REAL NOT NULL, y REAL NOT NULL)",
        "unable to create table",
    )
}

#[test]
fn committed_rows_are_durable() -> Result<(), Box<dyn std::error::Error>> {
    let db = TestDb::new("commit");
    {
        let mut conn = db.open(true)?;
        create_points(&mut conn)?;
        conn.begin()?;
        assert!(conn.in_transaction());
        let rows: Vec<Row> = (0..100).map(|i| row![i, i * 2, i * 3]).collect();
        conn.insert("INSERT INTO points VALUES (?, ?, ?)", &rows)?;
        conn.commit()?;
        assert!(!conn.in_transaction());
    }

    let mut conn = db.open(false)?;
    assert_eq!(count_rows(&mut conn, "points")?, 100);
    conn.query("SELECT x, y FROM points WHERE id = 7")?;
    assert_eq!(conn.current()?[0].as_text(), Some("14.0"));
    assert_eq!(conn.current()?[1].as_text(), Some("21.0"));
    Ok(())
}

#[test]
fn failed_insert_without_commit_leaves_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let db = TestDb::new("abandon");
    {
        let mut conn = db.open(true)?;
        create_points(&mut conn)?;
        conn.begin()?;
        conn.insert("INSERT INTO points VALUES (?, ?, ?)", &[row![1, 1.0, 1.0]])?;
        let err = conn
            .insert(
                "INSERT INTO points VALUES (?, ?, ?)",
                &[row![2, 2.0, 2.0], row![3, ColumnValue::Null, 3.0]],
            )
            .unwrap_err();
        assert!(matches!(err, PointStoreError::DriverError(_)));
        // dropped here with the transaction still open
    }

    let mut conn = db.open(false)?;
    assert_eq!(count_rows(&mut conn, "points")?, 0);
    Ok(())
}

#[test]
fn explicit_rollback_through_execute() -> Result<(), Box<dyn std::error::Error>> {
    let db = TestDb::new("rollback");
    let mut conn = db.open(true)?;
    create_points(&mut conn)?;
    conn.begin()?;
    conn.insert("INSERT INTO points VALUES (?, ?, ?)", &[row![1, 1.0, 1.0]])?;
    conn.execute("ROLLBACK", "unable to roll back transaction")?;
    assert!(!conn.in_transaction());
    assert_eq!(count_rows(&mut conn, "points")?, 0);
    Ok(())
}

#[test]
fn commit_without_begin_fails() -> Result<(), Box<dyn std::error::Error>> {
    let db = TestDb::new("nocommit");
    let mut conn = db.open(true)?;
    let err = conn.commit().unwrap_err();
    assert!(matches!(err, PointStoreError::DriverError(_)));
    assert!(err.to_string().contains("unable to commit transaction 'COMMIT'"), "{err}");
    Ok(())
}

#[test]
fn nested_begin_fails() -> Result<(), Box<dyn std::error::Error>> {
    let db = TestDb::new("nested");
    let mut conn = db.open(true)?;
    conn.begin()?;
    let err = conn.begin().unwrap_err();
    assert!(err.to_string().contains("unable to begin transaction 'BEGIN'"), "{err}");
    // the outer transaction is still usable
    conn.commit()?;
    Ok(())
}

#[test]
fn begin_on_closed_connection_fails() {
    let db = TestDb::new("closedtx");
    let mut conn = Connection::with_options(db.options(true), std::sync::Arc::new(TracingLog));
    let err = conn.begin().unwrap_err();
    assert!(err.to_string().contains("session not opened"), "{err}");
    assert!(!conn.in_transaction());
}
