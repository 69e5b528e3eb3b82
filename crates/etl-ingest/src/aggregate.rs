//! Directory aggregation: one record set from every source file.

use std::path::{Path, PathBuf};

use etl_model::{RecordSet, Schema};

use crate::csv_source::read_csv_records;
use crate::discovery::list_source_files;
use crate::error::Result;
use crate::format::SourceFormat;
use crate::json_source::read_json_records;
use crate::xml_source::read_xml_records;

/// Reads one source file with the reader for its format.
pub fn read_records(path: &Path, format: SourceFormat, schema: &Schema) -> Result<RecordSet> {
    match format {
        SourceFormat::Csv => read_csv_records(path, schema),
        SourceFormat::JsonLines => read_json_records(path, schema),
        SourceFormat::Xml => read_xml_records(path, schema),
    }
}

/// Collects every supported source file under `dir` into one record set.
///
/// Formats are processed in the fixed order csv, json, xml; files within a
/// format in filesystem enumeration order. Records are appended in file
/// order, so set order is format order, then file order, then in-file order.
/// The first failing file aborts the whole collection — no partial
/// extraction guarantee is given.
pub fn collect_records(dir: &Path, schema: &Schema) -> Result<RecordSet> {
    let mut set = RecordSet::new(schema.clone());
    let mut file_count = 0usize;

    for format in SourceFormat::ALL {
        for path in list_source_files(dir, format)? {
            let records = read_records(&path, format, schema)?;
            tracing::debug!(
                path = %path.display(),
                format = %format,
                rows = records.len(),
                "source file extracted"
            );
            set.extend(records);
            file_count += 1;
        }
    }

    tracing::info!(
        dir = %dir.display(),
        files = file_count,
        rows = set.len(),
        "extraction complete"
    );
    Ok(set)
}

/// Anything that can yield a record set for a job.
///
/// This is the seam for collaborators outside the flat-file core — e.g. an
/// HTML-table scraper — which must signal failure through [`crate::IngestError`]
/// rather than a sentinel value.
pub trait RecordSource {
    /// Produce the full record set, or fail.
    fn fetch(&self) -> Result<RecordSet>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

/// The standard flat-file source: a directory of csv/json/xml files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    schema: Schema,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>, schema: Schema) -> Self {
        Self {
            dir: dir.into(),
            schema,
        }
    }
}

impl RecordSource for DirectorySource {
    fn fetch(&self) -> Result<RecordSet> {
        collect_records(&self.dir, &self.schema)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use etl_model::{Field, FieldType, Value};

    fn people_schema() -> Schema {
        Schema::new(vec![
            Field::new("name", FieldType::Str),
            Field::new("height", FieldType::Float),
            Field::new("weight", FieldType::Float),
        ])
    }

    #[test]
    fn test_collect_concatenates_in_format_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("a.csv"),
            "name,height,weight\nCsv,1,2\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("b.json"),
            "{\"name\":\"Json\",\"height\":3,\"weight\":4}\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("c.xml"),
            "<root><rec><name>Xml</name><height>5</height><weight>6</weight></rec></root>",
        )
        .unwrap();

        let set = collect_records(dir.path(), &people_schema()).unwrap();
        assert_eq!(set.len(), 3);
        // csv first, json second, xml last, regardless of filenames
        assert_eq!(set.value(0, "name"), Some(&Value::Str("Csv".into())));
        assert_eq!(set.value(1, "name"), Some(&Value::Str("Json".into())));
        assert_eq!(set.value(2, "name"), Some(&Value::Str("Xml".into())));
    }

    #[test]
    fn test_collect_empty_directory() {
        let dir = TempDir::new().unwrap();
        let set = collect_records(dir.path(), &people_schema()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_failing_file_aborts_collection() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.csv"), "name,height,weight\nOk,1,2\n").unwrap();
        std::fs::write(dir.path().join("b.json"), "not json\n").unwrap();

        let result = collect_records(dir.path(), &people_schema());
        assert!(result.is_err());
    }

    #[test]
    fn test_directory_source_fetch() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.csv"), "name,height,weight\nA,1,2\n").unwrap();

        let source = DirectorySource::new(dir.path(), people_schema());
        let set = source.fetch().unwrap();
        assert_eq!(set.len(), 1);
    }
}
