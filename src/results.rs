use crate::types::ColumnValue;

mod record_set;

pub use record_set::RecordSet;

/// One materialized row; its length equals the statement's column count.
pub type Row = Vec<ColumnValue>;
