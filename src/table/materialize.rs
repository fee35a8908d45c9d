//! Row materialization

use super::clock::{format_timestamp, DATE_PROCESSED};
use super::types::Row;
use crate::error::{Error, Result};
use crate::shape::{Composite, Field};
use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::warn;

/// Cell text used when a member cannot be rendered
pub const UNRENDERABLE: &str = "<unrenderable>";

/// Header row for a field list: member names followed by `date_processed`
pub fn header_row(fields: &[Field]) -> Row {
    fields
        .iter()
        .map(|f| f.name.clone())
        .chain(std::iter::once(DATE_PROCESSED.to_string()))
        .collect()
}

/// Render one record as a row, in `fields` order, followed by `now`.
///
/// A member that cannot be rendered becomes [`UNRENDERABLE`]; the rest of the
/// row is kept.
pub fn materialize(element: &dyn Composite, fields: &[Field], now: NaiveDateTime) -> Row {
    let mut row = Vec::with_capacity(fields.len() + 1);

    for field in fields {
        let cell = element
            .value_of(field)
            .and_then(|value| format_cell(&field.name, &value));

        match cell {
            Ok(text) => row.push(text),
            Err(e) => {
                warn!("Rendering placeholder for field '{}': {}", field.name, e);
                row.push(UNRENDERABLE.to_string());
            }
        }
    }

    row.push(format_timestamp(now));
    row
}

/// Default string form of a cell value.
///
/// Strings are verbatim, numbers base-10, booleans `true`/`false`, null is
/// empty, and nested arrays/objects are compact JSON.
pub fn format_cell(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string(value).map_err(|e| Error::serialization(field, e.to_string()))
        }
    }
}
