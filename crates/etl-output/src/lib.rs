//! Sinks for transformed record sets.
//!
//! A job's load step writes one [`etl_model::RecordSet`] to zero or more
//! sinks: flat files (CSV or JSON lines, replaced atomically) and SQLite
//! tables (contents replaced wholesale on every run). Sinks are written in
//! order and are not transactionally coupled.

mod error;
mod flat_file;
mod sqlite;
mod target;

pub use error::{OutputError, Result};
pub use flat_file::{write_csv_file, write_json_lines_file};
pub use sqlite::write_sqlite_table;
pub use target::{SinkTarget, WriteOptions, load, write_records};
