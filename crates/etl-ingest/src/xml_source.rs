//! XML source reading.
//!
//! Expected shape: a single root element containing one child element per
//! record, each exposing a fixed set of named leaf elements:
//!
//! ```xml
//! <people>
//!   <person><name>Alice</name><height>65</height><weight>120</weight></person>
//! </people>
//! ```
//!
//! Unlike the CSV reader, leaf values are coerced to the declared field type
//! at read time; a missing leaf or an uncoercible numeric fails the whole
//! read.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use etl_model::{FieldType, Record, RecordSet, Schema, Value};

use crate::error::{IngestError, Result, open_error};
use crate::format::SourceFormat;

/// Reads one XML file into a record set with the job's schema.
pub fn read_xml_records(path: &Path, schema: &Schema) -> Result<RecordSet> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = Reader::from_reader(BufReader::new(file));
    reader.config_mut().trim_text(true);

    let mut set = RecordSet::new(schema.clone());
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut leaves: BTreeMap<String, String> = BTreeMap::new();
    let mut leaf_name = String::new();
    let mut leaf_text = String::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| parse_error(path, &reader, e.to_string()))?;
        match event {
            Event::Start(start) => {
                depth += 1;
                match depth {
                    // Root element: nothing to capture.
                    1 => {}
                    2 => leaves.clear(),
                    3 => {
                        leaf_name =
                            String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                        leaf_text.clear();
                    }
                    _ => {
                        return Err(parse_error(
                            path,
                            &reader,
                            "nested elements below record leaves".to_string(),
                        ));
                    }
                }
            }
            Event::Empty(empty) => match depth {
                // Self-closing leaf: present but empty.
                2 => {
                    let name = String::from_utf8_lossy(empty.local_name().as_ref()).into_owned();
                    leaves.insert(name, String::new());
                }
                // Self-closing record: no leaves at all.
                1 => {
                    leaves.clear();
                    set.push(build_record(path, schema, &leaves)?);
                }
                _ => {}
            },
            Event::Text(text) => {
                if depth == 3 {
                    let decoded = text
                        .unescape()
                        .map_err(|e| parse_error(path, &reader, e.to_string()))?;
                    leaf_text.push_str(&decoded);
                }
            }
            Event::End(_) => {
                match depth {
                    3 => {
                        leaves.insert(std::mem::take(&mut leaf_name), std::mem::take(&mut leaf_text));
                    }
                    2 => set.push(build_record(path, schema, &leaves)?),
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions.
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(path = %path.display(), rows = set.len(), "xml file read");
    Ok(set)
}

fn parse_error<R>(path: &Path, reader: &Reader<R>, message: String) -> IngestError {
    IngestError::Parse {
        path: path.to_path_buf(),
        format: SourceFormat::Xml,
        message: format!("position {}: {message}", reader.buffer_position()),
    }
}

/// Build one record, coercing every leaf to its declared type.
fn build_record(
    path: &Path,
    schema: &Schema,
    leaves: &BTreeMap<String, String>,
) -> Result<Record> {
    let mut values = Vec::with_capacity(schema.len());
    for field in schema.fields() {
        let text = leaves
            .get(&field.name)
            .ok_or_else(|| IngestError::MissingField {
                path: path.to_path_buf(),
                field: field.name.clone(),
            })?;
        let value = match field.field_type {
            FieldType::Str => Value::Str(text.clone()),
            FieldType::Int => {
                Value::Int(text.trim().parse::<i64>().map_err(|_| coerce_error(
                    path, &field.name, text, "integer",
                ))?)
            }
            FieldType::Float => {
                Value::Float(text.trim().parse::<f64>().map_err(|_| coerce_error(
                    path, &field.name, text, "float",
                ))?)
            }
        };
        values.push(value);
    }
    Ok(Record::new(values))
}

fn coerce_error(path: &Path, field: &str, text: &str, expected: &str) -> IngestError {
    IngestError::Parse {
        path: path.to_path_buf(),
        format: SourceFormat::Xml,
        message: format!("field '{field}': '{text}' is not a valid {expected}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use etl_model::Field;

    fn car_schema() -> Schema {
        Schema::new(vec![
            Field::new("car_model", FieldType::Str),
            Field::new("year_of_manufacture", FieldType::Int),
            Field::new("price", FieldType::Float),
            Field::new("fuel", FieldType::Str),
        ])
    }

    fn create_temp_xml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".xml").unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_read_well_formed() {
        let file = create_temp_xml(
            "<cars>\
               <car><car_model>alto</car_model><year_of_manufacture>2017</year_of_manufacture>\
                 <price>4253.73</price><fuel>Petrol</fuel></car>\
               <car><car_model>swift</car_model><year_of_manufacture>2014</year_of_manufacture>\
                 <price>3333.33</price><fuel>Diesel</fuel></car>\
             </cars>",
        );
        let set = read_xml_records(file.path(), &car_schema()).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.value(0, "car_model"), Some(&Value::Str("alto".into())));
        assert_eq!(set.value(0, "year_of_manufacture"), Some(&Value::Int(2017)));
        assert_eq!(set.value(1, "price"), Some(&Value::Float(3333.33)));
    }

    #[test]
    fn test_missing_leaf_fails_whole_read() {
        let file = create_temp_xml(
            "<cars>\
               <car><car_model>alto</car_model><year_of_manufacture>2017</year_of_manufacture>\
                 <price>4253.73</price><fuel>Petrol</fuel></car>\
               <car><car_model>swift</car_model><price>3333.33</price><fuel>Diesel</fuel></car>\
             </cars>",
        );
        let result = read_xml_records(file.path(), &car_schema());
        assert!(matches!(
            result,
            Err(IngestError::MissingField { field, .. }) if field == "year_of_manufacture"
        ));
    }

    #[test]
    fn test_bad_numeric_leaf() {
        let file = create_temp_xml(
            "<cars><car><car_model>alto</car_model>\
               <year_of_manufacture>soon</year_of_manufacture>\
               <price>1</price><fuel>Petrol</fuel></car></cars>",
        );
        let result = read_xml_records(file.path(), &car_schema());
        assert!(matches!(result, Err(IngestError::Parse { .. })));
    }

    #[test]
    fn test_empty_root() {
        let file = create_temp_xml("<cars></cars>");
        let set = read_xml_records(file.path(), &car_schema()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_entity_unescaping() {
        let schema = Schema::new(vec![Field::new("name", FieldType::Str)]);
        let file = create_temp_xml("<root><rec><name>A &amp; B</name></rec></root>");
        let set = read_xml_records(file.path(), &schema).unwrap();
        assert_eq!(set.value(0, "name"), Some(&Value::Str("A & B".into())));
    }
}
