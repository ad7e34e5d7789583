//! JSON output for the CLI
//!
//! - One JSON object per line on stdout
//! - Rows carry visible columns only, keyed by column name
//! - UTF-8 only

use std::io::Write;

use serde_json::{Map, Value as JsonValue};

use crate::planner::ColumnIndex;
use crate::vtab::{Row, VirtualTable};

use super::errors::CliResult;

/// Converts a row to a JSON object of the table's visible columns
pub fn row_object<T: VirtualTable>(row: &Row) -> CliResult<JsonValue> {
    let mut object = Map::new();
    for column in T::Column::ALL.iter().filter(|c| !c.is_hidden()) {
        let value = usize::try_from(column.raw())
            .ok()
            .and_then(|i| row.get(i))
            .map(serde_json::to_value)
            .transpose()?
            .unwrap_or(JsonValue::Null);
        object.insert(column.name().to_string(), value);
    }
    Ok(JsonValue::Object(object))
}

/// Write one JSON value as a line
pub fn write_json_line<W: Write>(out: &mut W, value: &JsonValue) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Write one row as a JSON object line
pub fn write_row<T: VirtualTable, W: Write>(out: &mut W, row: &Row) -> CliResult<()> {
    write_json_line(out, &row_object::<T>(row)?)
}
