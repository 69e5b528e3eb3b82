//! Sink targets and the dual-sink loader.

use std::collections::BTreeMap;
use std::path::PathBuf;

use etl_model::RecordSet;

use crate::error::Result;
use crate::flat_file::{write_csv_file, write_json_lines_file};
use crate::sqlite::write_sqlite_table;

/// A durable destination for a record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    /// CSV file, overwritten wholesale on every run.
    Csv { path: PathBuf },
    /// JSON-lines file, overwritten wholesale on every run.
    JsonLines { path: PathBuf },
    /// SQLite table with replace-contents semantics.
    Sqlite { path: PathBuf, table: String },
}

impl SinkTarget {
    /// Short description for logs and progress messages.
    pub fn describe(&self) -> String {
        match self {
            SinkTarget::Csv { path } => format!("csv file {}", path.display()),
            SinkTarget::JsonLines { path } => format!("json file {}", path.display()),
            SinkTarget::Sqlite { path, table } => {
                format!("table '{table}' in {}", path.display())
            }
        }
    }
}

/// Formatting options for flat-file sinks.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Fixed decimal places per field, for fields a rounding rule applied to.
    pub precision: BTreeMap<String, u32>,
}

/// Write the record set to one sink.
pub fn write_records(set: &RecordSet, target: &SinkTarget, options: &WriteOptions) -> Result<()> {
    match target {
        SinkTarget::Csv { path } => write_csv_file(set, path, options),
        SinkTarget::JsonLines { path } => write_json_lines_file(set, path),
        SinkTarget::Sqlite { path, table } => write_sqlite_table(set, path, table),
    }
}

/// Write the record set to every sink, in order.
///
/// The first failing sink aborts the remaining ones. Sinks are not
/// transactionally coupled: anything already written stays in place and the
/// error is surfaced to the caller.
pub fn load(set: &RecordSet, targets: &[SinkTarget], options: &WriteOptions) -> Result<()> {
    for target in targets {
        write_records(set, target, options)?;
        tracing::info!(sink = %target.describe(), rows = set.len(), "sink written");
    }
    Ok(())
}
