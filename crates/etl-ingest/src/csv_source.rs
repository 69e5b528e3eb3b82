//! CSV source reading.
//!
//! The first row is the header and must contain every declared field name;
//! records map to the schema by header position. Cells are kept as text —
//! coercion is the transform step's job — except that numeric-looking cells
//! of numeric-declared fields arrive already typed.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;

use etl_model::{FieldType, Record, RecordSet, Schema, Value};

use crate::error::{IngestError, Result, open_error};
use crate::format::SourceFormat;

/// Reads one CSV file into a record set with the job's schema.
pub fn read_csv_records(path: &Path, schema: &Schema) -> Result<RecordSet> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| parse_error(path, &e))?
        .clone();

    // Header position of each declared field, in schema order.
    let mut indices = Vec::with_capacity(schema.len());
    for field in schema.fields() {
        let index = headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == field.name)
            .ok_or_else(|| IngestError::MissingField {
                path: path.to_path_buf(),
                field: field.name.clone(),
            })?;
        indices.push(index);
    }

    let mut set = RecordSet::new(schema.clone());
    for row_result in reader.records() {
        let row = row_result.map_err(|e| parse_error(path, &e))?;
        let mut values = Vec::with_capacity(indices.len());
        for (field, &index) in schema.fields().iter().zip(&indices) {
            let raw = row.get(index).unwrap_or("");
            values.push(cell_value(raw, field.field_type));
        }
        set.push(Record::new(values));
    }

    tracing::debug!(path = %path.display(), rows = set.len(), "csv file read");
    Ok(set)
}

fn parse_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::Parse {
        path: path.to_path_buf(),
        format: SourceFormat::Csv,
        message: error.to_string(),
    }
}

/// Type a raw CSV cell. Empty cells are the missing-value marker.
fn cell_value(raw: &str, field_type: FieldType) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    match field_type {
        FieldType::Int => match raw.parse::<i64>() {
            Ok(v) => Value::Int(v),
            Err(_) => Value::Str(raw.to_string()),
        },
        FieldType::Float => match raw.parse::<f64>() {
            Ok(v) => Value::Float(v),
            Err(_) => Value::Str(raw.to_string()),
        },
        FieldType::Str => Value::Str(raw.to_string()),
    }
}
