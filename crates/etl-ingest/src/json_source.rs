//! Line-delimited JSON source reading.
//!
//! Each non-blank line is one self-contained record object whose field set
//! must match the job's declared schema exactly. A malformed line fails the
//! whole read; there is no partial recovery.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use etl_model::{FieldType, Record, RecordSet, Schema, Value};

use crate::error::{IngestError, Result, open_error};
use crate::format::SourceFormat;

/// Reads one JSON-lines file into a record set with the job's schema.
pub fn read_json_records(path: &Path, schema: &Schema) -> Result<RecordSet> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let reader = BufReader::new(file);

    let mut set = RecordSet::new(schema.clone());
    for (line_no, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let trimmed = line.trim_start_matches('\u{feff}').trim();
        if trimmed.is_empty() {
            continue;
        }

        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(trimmed)
            .map_err(|e| IngestError::Parse {
                path: path.to_path_buf(),
                format: SourceFormat::JsonLines,
                message: format!("line {}: {e}", line_no + 1),
            })?;

        set.push(record_from_object(path, line_no + 1, &object, schema)?);
    }

    tracing::debug!(path = %path.display(), rows = set.len(), "json-lines file read");
    Ok(set)
}

fn record_from_object(
    path: &Path,
    line_no: usize,
    object: &serde_json::Map<String, serde_json::Value>,
    schema: &Schema,
) -> Result<Record> {
    // The declared field set is exact: no extra keys, no missing keys.
    let extra: Vec<&str> = object
        .keys()
        .filter(|key| schema.index_of(key).is_none())
        .map(String::as_str)
        .collect();
    if !extra.is_empty() {
        return Err(IngestError::SchemaMismatch {
            path: path.to_path_buf(),
            message: format!("line {line_no}: undeclared fields {extra:?}"),
        });
    }

    let mut values = Vec::with_capacity(schema.len());
    for field in schema.fields() {
        let raw = object
            .get(&field.name)
            .ok_or_else(|| IngestError::MissingField {
                path: path.to_path_buf(),
                field: field.name.clone(),
            })?;
        values.push(json_value(path, line_no, &field.name, raw, field.field_type)?);
    }
    Ok(Record::new(values))
}

fn json_value(
    path: &Path,
    line_no: usize,
    field: &str,
    raw: &serde_json::Value,
    field_type: FieldType,
) -> Result<Value> {
    let mismatch = |expected: &str| IngestError::SchemaMismatch {
        path: path.to_path_buf(),
        message: format!("line {line_no}: field '{field}' is not {expected} ({raw})"),
    };

    match (field_type, raw) {
        (_, serde_json::Value::Null) => Ok(Value::Null),
        (FieldType::Str, serde_json::Value::String(v)) => Ok(Value::Str(v.clone())),
        (FieldType::Str, serde_json::Value::Number(v)) => Ok(Value::Str(v.to_string())),
        (FieldType::Int, serde_json::Value::Number(v)) => {
            v.as_i64().map(Value::Int).ok_or_else(|| mismatch("an integer"))
        }
        (FieldType::Float, serde_json::Value::Number(v)) => {
            v.as_f64().map(Value::Float).ok_or_else(|| mismatch("a number"))
        }
        // Numeric fields may arrive quoted; keep the text for the transform
        // step's coercion rule.
        (FieldType::Int | FieldType::Float, serde_json::Value::String(v)) => {
            Ok(Value::Str(v.clone()))
        }
        _ => Err(mismatch("a scalar")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use etl_model::Field;

    fn people_schema() -> Schema {
        Schema::new(vec![
            Field::new("name", FieldType::Str),
            Field::new("height", FieldType::Float),
            Field::new("weight", FieldType::Float),
        ])
    }

    fn create_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_read_well_formed() {
        let file = create_temp_json(
            "{\"name\":\"Alice\",\"height\":65,\"weight\":120}\n\
             {\"name\":\"Bob\",\"height\":70.5,\"weight\":190}\n",
        );
        let set = read_json_records(file.path(), &people_schema()).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.value(0, "height"), Some(&Value::Float(65.0)));
        assert_eq!(set.value(1, "name"), Some(&Value::Str("Bob".into())));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let file = create_temp_json("{\"name\":\"A\",\"height\":1,\"weight\":2}\n\n");
        let set = read_json_records(file.path(), &people_schema()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_malformed_line_fails_whole_read() {
        let file = create_temp_json(
            "{\"name\":\"A\",\"height\":1,\"weight\":2}\nnot json\n",
        );
        let result = read_json_records(file.path(), &people_schema());
        assert!(matches!(result, Err(IngestError::Parse { .. })));
    }

    #[test]
    fn test_missing_field() {
        let file = create_temp_json("{\"name\":\"A\",\"height\":1}\n");
        let result = read_json_records(file.path(), &people_schema());
        assert!(matches!(
            result,
            Err(IngestError::MissingField { field, .. }) if field == "weight"
        ));
    }

    #[test]
    fn test_undeclared_field() {
        let file = create_temp_json(
            "{\"name\":\"A\",\"height\":1,\"weight\":2,\"age\":30}\n",
        );
        let result = read_json_records(file.path(), &people_schema());
        assert!(matches!(result, Err(IngestError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_quoted_number_stays_text() {
        let file = create_temp_json("{\"name\":\"A\",\"height\":\"1,234\",\"weight\":2}\n");
        let set = read_json_records(file.path(), &people_schema()).unwrap();
        assert_eq!(set.value(0, "height"), Some(&Value::Str("1,234".into())));
    }
}
