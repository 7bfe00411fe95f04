use rusqlite::ToSql;
use rusqlite::types::{ToSqlOutput, ValueRef};

use crate::error::PointStoreError;
use crate::types::ColumnValue;

/// Largest payload `SQLite` accepts for a single bound value.
pub const MAX_BIND_BYTES: usize = i32::MAX as usize;

// Borrowed outputs: no copy on our side, SQLite takes its own copy at bind time.
impl ToSql for ColumnValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            ColumnValue::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            ColumnValue::Text(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
            ColumnValue::Blob(bytes) => ToSqlOutput::Borrowed(ValueRef::Blob(bytes)),
        })
    }
}

/// Reject payloads the engine cannot bind before they reach it.
///
/// # Errors
/// Returns `PointStoreError::BufferTooSmall` naming the row and position.
pub fn check_bind_size(
    value: &ColumnValue,
    row: usize,
    position: usize,
) -> Result<(), PointStoreError> {
    let len = value.as_bytes().map_or(0, <[u8]>::len);
    if len > MAX_BIND_BYTES {
        return Err(PointStoreError::BufferTooSmall(format!(
            "value of {len} bytes at row number '{row}' position number '{position}' exceeds the {MAX_BIND_BYTES} byte bind limit"
        )));
    }
    Ok(())
}
