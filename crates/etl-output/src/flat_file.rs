//! Flat-file sinks with atomic replacement.
//!
//! Both writers serialize the full record set to a temp file in the
//! destination directory and rename it over the target, so a failed run
//! never leaves a partially written output file visible.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use etl_model::{RecordSet, Value, format_value};

use crate::error::{OutputError, Result};
use crate::target::WriteOptions;

/// Write the record set as a CSV file: header row, then one row per record.
///
/// Float fields with a configured precision are emitted with that fixed
/// number of decimal places; nulls become empty cells.
pub fn write_csv_file(set: &RecordSet, path: &Path, options: &WriteOptions) -> Result<()> {
    let mut tmp = create_temp(path)?;
    {
        let mut writer = csv::Writer::from_writer(tmp.as_file_mut());

        writer
            .write_record(set.schema().names())
            .map_err(|e| write_error(path, &e))?;

        let precision: Vec<Option<u32>> = set
            .schema()
            .names()
            .map(|name| options.precision.get(name).copied())
            .collect();

        for record in set.records() {
            let row = record
                .values()
                .iter()
                .zip(&precision)
                .map(|(value, prec)| format_value(value, *prec));
            writer.write_record(row).map_err(|e| write_error(path, &e))?;
        }
        writer.flush().map_err(|e| io_error(path, &e))?;
    }
    persist(tmp, path)?;

    tracing::debug!(path = %path.display(), rows = set.len(), "csv sink written");
    Ok(())
}

/// Write the record set as line-delimited JSON: one object per record.
pub fn write_json_lines_file(set: &RecordSet, path: &Path) -> Result<()> {
    let mut tmp = create_temp(path)?;
    {
        let file = tmp.as_file_mut();
        for record in set.records() {
            let mut object = serde_json::Map::with_capacity(set.schema().len());
            for (name, value) in set.schema().names().zip(record.values()) {
                object.insert(name.to_string(), json_value(value));
            }
            let line =
                serde_json::to_string(&object).map_err(|e| write_error(path, &e))?;
            writeln!(file, "{line}").map_err(|e| io_error(path, &e))?;
        }
        file.flush().map_err(|e| io_error(path, &e))?;
    }
    persist(tmp, path)?;

    tracing::debug!(path = %path.display(), rows = set.len(), "json sink written");
    Ok(())
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Str(v) => serde_json::Value::String(v.clone()),
        Value::Int(v) => serde_json::Value::from(*v),
        Value::Float(v) => serde_json::Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Null => serde_json::Value::Null,
    }
}

/// Ensure the parent directory exists and open a temp file inside it.
fn create_temp(path: &Path) -> Result<NamedTempFile> {
    let dir = parent_dir(path);
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&dir).map_err(|e| OutputError::CreateDir {
            path: dir.clone(),
            source: e,
        })?;
    }
    NamedTempFile::new_in(&dir).map_err(|e| OutputError::TempFile { dir, source: e })
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn persist(tmp: NamedTempFile, path: &Path) -> Result<()> {
    tmp.persist(path).map_err(|e| OutputError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

fn write_error(path: &Path, error: &dyn std::fmt::Display) -> OutputError {
    OutputError::Write {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

fn io_error(path: &Path, error: &std::io::Error) -> OutputError {
    OutputError::Write {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
