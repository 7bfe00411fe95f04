/// Build a [`Row`](crate::results::Row) from anything convertible into a
/// [`ColumnValue`](crate::types::ColumnValue).
///
/// ```rust
/// use pointstore_sqlite::{ColumnValue, row};
///
/// let r = row!["a", 42, ColumnValue::Null];
/// assert_eq!(r[1].as_text(), Some("42"));
/// ```
#[macro_export]
macro_rules! row {
    () => {
        ::std::vec::Vec::<$crate::types::ColumnValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::types::ColumnValue::from($value)),+]
    };
}
