use rusqlite::Statement;
use rusqlite::types::ValueRef;

use crate::error::PointStoreError;
use crate::results::{RecordSet, Row};
use crate::types::ColumnValue;

/// Significant digits `SQLite` keeps when it renders a REAL as text.
const REAL_TEXT_DIGITS: usize = 15;

/// Render a REAL exactly as `SQLite` does when the column is read as text.
///
/// This is the engine's `%!.15g`: 15 significant digits with trailing zeros
/// dropped, at least one digit after the decimal point, and exponent form
/// (`1.0e+20`, `1.0e-07`) when the decimal exponent is below -4 or above 14.
#[must_use]
pub fn render_real(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Inf" } else { "Inf" }.into();
    }

    // `{:.14e}` rounds to 15 significant digits, e.g. `3.00000000000000e-1`.
    let scientific = format!("{:.*e}", REAL_TEXT_DIGITS - 1, value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = match digits.trim_end_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    let mut out = String::with_capacity(24);
    // -0.0 renders without a sign
    if value < 0.0 {
        out.push('-');
    }
    let (lead, rest) = digits.split_at(1);
    if exponent < -4 || exponent > REAL_TEXT_DIGITS as i32 - 1 {
        out.push_str(lead);
        out.push('.');
        out.push_str(if rest.is_empty() { "0" } else { rest });
        out.push('e');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&format!("{:02}", exponent.unsigned_abs()));
    } else if exponent < 0 {
        out.push_str("0.");
        for _ in 1..exponent.unsigned_abs() {
            out.push('0');
        }
        out.push_str(digits);
    } else {
        let int_len = exponent.unsigned_abs() as usize + 1;
        if digits.len() > int_len {
            let (int_part, frac_part) = digits.split_at(int_len);
            out.push_str(int_part);
            out.push('.');
            out.push_str(frac_part);
        } else {
            out.push_str(digits);
            for _ in digits.len()..int_len {
                out.push('0');
            }
            out.push_str(".0");
        }
    }
    out
}

/// Convert the engine cell in column `idx` into a `ColumnValue`.
///
/// Numbers and text come back as text; blobs keep their exact bytes.
///
/// # Errors
/// Returns `PointStoreError::DriverError` when a TEXT cell is not valid
/// UTF-8. The bytes are never replaced or truncated.
pub fn extract_value(value: ValueRef<'_>, idx: usize) -> Result<ColumnValue, PointStoreError> {
    Ok(match value {
        ValueRef::Null => ColumnValue::Null,
        ValueRef::Integer(i) => ColumnValue::Text(i.to_string()),
        ValueRef::Real(f) => ColumnValue::Text(render_real(f)),
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => ColumnValue::Text(text.to_owned()),
            Err(e) => {
                return Err(PointStoreError::DriverError(format!(
                    "statement step failed: column {idx} is not valid UTF-8: {e}"
                )));
            }
        },
        ValueRef::Blob(bytes) => ColumnValue::Blob(bytes.to_vec()),
    })
}

/// Step `stmt` to completion and materialize every row.
///
/// Column names are captured once, from the first row produced; a statement
/// yielding no rows leaves them empty.
///
/// # Errors
/// Returns `PointStoreError::DriverError` if any step fails. Rows collected
/// before the failure are dropped with the partial set.
pub fn build_record_set(stmt: &mut Statement<'_>) -> Result<RecordSet, PointStoreError> {
    let column_count = stmt.column_count();
    let mut declared_names: Option<Vec<String>> = Some(
        stmt.column_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    );
    let mut record_set = RecordSet::with_capacity(16);

    let mut rows = stmt.raw_query();
    while let Some(row) = rows.next().map_err(step_failed)? {
        if record_set.column_names().len() != column_count {
            if let Some(names) = declared_names.take() {
                record_set.set_column_names(names);
            }
        }

        let mut values: Row = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            let value = row.get_ref(idx).map_err(step_failed)?;
            values.push(extract_value(value, idx)?);
        }
        record_set.push_row(values);
    }

    Ok(record_set)
}

fn step_failed(err: rusqlite::Error) -> PointStoreError {
    PointStoreError::DriverError(format!("statement step failed: {err}"))
}
