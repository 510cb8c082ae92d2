use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{DatasetError, DatasetResult};

/// One dataset sample: field name to JSON value, in file order.
pub type Record = Map<String, Value>;

/// Reads a JSON-lines dataset file, one record per line.
pub fn read_records(path: impl AsRef<Path>) -> DatasetResult<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = read_records_from(BufReader::new(file))?;
    info!(path = %path.display(), records = records.len(), "loaded dataset");
    Ok(records)
}

/// Parses JSON-lines records from any buffered reader. Blank lines are
/// skipped; line numbers in errors are 1-based.
pub fn read_records_from<R: BufRead>(reader: R) -> DatasetResult<Vec<Record>> {
    let mut records = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(&line).map_err(|source| DatasetError::Parse {
            line: line_no,
            source,
        })?;
        match value {
            Value::Object(map) => records.push(map),
            _ => return Err(DatasetError::NotAnObject { line: line_no }),
        }
    }

    debug!(records = records.len(), "parsed JSON lines");
    Ok(records)
}

/// Converts a nested numeric list field into coordinate rows.
///
/// Rows are not required to share a length; checking arity is left to the
/// consumer.
pub fn extract_rows(record: &Record, field: &str) -> DatasetResult<Vec<Vec<f32>>> {
    let value = record
        .get(field)
        .ok_or_else(|| DatasetError::missing_field(field))?;
    let rows = value
        .as_array()
        .ok_or_else(|| DatasetError::invalid_field(field, "expected a list of points"))?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| -> DatasetResult<Vec<f32>> {
            let coords = row
                .as_array()
                .ok_or_else(|| DatasetError::invalid_field(field, format!("row {i} is not a list")))?;
            coords
                .iter()
                .map(|c| {
                    c.as_f64().map(|v| v as f32).ok_or_else(|| {
                        DatasetError::invalid_field(field, format!("row {i} holds a non-numeric value"))
                    })
                })
                .collect()
        })
        .collect()
}

/// Reads an integer label.
pub fn record_label(record: &Record, field: &str) -> DatasetResult<i64> {
    let value = record
        .get(field)
        .ok_or_else(|| DatasetError::missing_field(field))?;
    value
        .as_i64()
        .ok_or_else(|| DatasetError::invalid_field(field, "expected an integer label"))
}
