//! Round-trip: a record set written to a flat-file sink and read back with
//! the matching reader compares equal, modulo numeric formatting precision.

use std::collections::BTreeMap;

use tempfile::TempDir;

use etl_ingest::{read_csv_records, read_json_records};
use etl_model::{Field, FieldType, Record, RecordSet, Schema, Value};
use etl_output::{WriteOptions, write_csv_file, write_json_lines_file};

fn people_schema() -> Schema {
    Schema::new(vec![
        Field::new("name", FieldType::Str),
        Field::new("height", FieldType::Float),
        Field::new("weight", FieldType::Float),
    ])
}

fn people_set() -> RecordSet {
    let mut set = RecordSet::new(people_schema());
    set.push(Record::new(vec![
        Value::Str("Alice".into()),
        Value::Float(1.65),
        Value::Float(54.43),
    ]));
    set.push(Record::new(vec![
        Value::Str("Bob".into()),
        Value::Float(1.78),
        Value::Float(86.18),
    ]));
    set
}

#[test]
fn csv_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let options = WriteOptions {
        precision: BTreeMap::from([("height".to_string(), 2), ("weight".to_string(), 2)]),
    };

    let original = people_set();
    write_csv_file(&original, &path, &options).unwrap();
    let reread = read_csv_records(&path, &people_schema()).unwrap();

    assert_eq!(reread, original);
}

#[test]
fn json_lines_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");

    let original = people_set();
    write_json_lines_file(&original, &path).unwrap();
    let reread = read_json_records(&path, &people_schema()).unwrap();

    assert_eq!(reread, original);
}
