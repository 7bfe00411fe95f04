use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// One cell exchanged with the engine.
///
/// Scalars are carried as their text rendering, the same way `SQLite` hands
/// them back when a column is read as text:
/// ```rust
/// use pointstore_sqlite::prelude::*;
///
/// let cells = vec![
///     ColumnValue::from("alice"),
///     ColumnValue::from(42),
///     ColumnValue::blob(vec![0x00, 0x01, 0xFF]),
///     ColumnValue::Null,
/// ];
/// assert_eq!(cells[1].as_text(), Some("42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnValue {
    /// SQL NULL
    #[default]
    Null,
    /// Text rendering of a scalar, bound as TEXT
    Text(String),
    /// Binary payload, bound as BLOB
    Blob(Vec<u8>),
}

impl ColumnValue {
    #[must_use]
    pub fn null() -> Self {
        ColumnValue::Null
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        ColumnValue::Text(value.into())
    }

    /// Wrap a binary payload. The value owns the buffer; binding borrows it
    /// for the duration of a single insert step.
    #[must_use]
    pub fn blob(bytes: impl Into<Vec<u8>>) -> Self {
        ColumnValue::Blob(bytes.into())
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    #[must_use]
    pub fn is_blob(&self) -> bool {
        matches!(self, ColumnValue::Blob(_))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let ColumnValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let ColumnValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// Raw bytes of either payload; `None` for NULL.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ColumnValue::Null => None,
            ColumnValue::Text(value) => Some(value.as_bytes()),
            ColumnValue::Blob(bytes) => Some(bytes),
        }
    }

    /// Re-parse the text rendering into a scalar.
    ///
    /// Returns `None` for NULL, blobs, and text that does not parse as `T`.
    #[must_use]
    pub fn parse<T: FromStr>(&self) -> Option<T> {
        self.as_text().and_then(|s| s.parse().ok())
    }

    /// Parse the text rendering as a timestamp written by `From<NaiveDateTime>`
    /// or by `SQLite`'s own `datetime()` family.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        let s = self.as_text()?;
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
            .ok()
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Null => f.write_str("NULL"),
            ColumnValue::Text(value) => f.write_str(value),
            ColumnValue::Blob(bytes) => write!(f, "<blob {} bytes>", bytes.len()),
        }
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ColumnValue {
                fn from(value: $ty) -> Self {
                    ColumnValue::Text(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char, &str, &String
);

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::Text(value)
    }
}

// SQLite has no boolean storage class; booleans live as 0/1 integers.
impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        ColumnValue::Text(if value { "1" } else { "0" }.to_string())
    }
}

impl From<NaiveDateTime> for ColumnValue {
    fn from(value: NaiveDateTime) -> Self {
        ColumnValue::Text(value.format("%F %T%.f").to_string())
    }
}

impl From<JsonValue> for ColumnValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => ColumnValue::Null,
            other => ColumnValue::Text(other.to_string()),
        }
    }
}

impl From<Vec<u8>> for ColumnValue {
    fn from(bytes: Vec<u8>) -> Self {
        ColumnValue::Blob(bytes)
    }
}

impl From<&[u8]> for ColumnValue {
    fn from(bytes: &[u8]) -> Self {
        ColumnValue::Blob(bytes.to_vec())
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ColumnValue::Null, Into::into)
    }
}
