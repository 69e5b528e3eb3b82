//! Source ingestion for batch ETL jobs.
//!
//! This crate discovers flat-file sources (CSV, line-delimited JSON, XML)
//! under a directory and reads them into a single [`etl_model::RecordSet`]
//! against the job's declared schema.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use etl_ingest::collect_records;
//! use etl_model::{Field, FieldType, Schema};
//!
//! let schema = Schema::new(vec![
//!     Field::new("name", FieldType::Str),
//!     Field::new("height", FieldType::Float),
//!     Field::new("weight", FieldType::Float),
//! ]);
//! let records = collect_records(Path::new("data/people"), &schema)?;
//! ```

mod aggregate;
mod csv_source;
mod discovery;
mod error;
mod format;
mod json_source;
mod xml_source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Formats & Discovery ===
pub use discovery::{list_source_files, source_inventory};
pub use format::SourceFormat;

// === Readers & Aggregation ===
pub use aggregate::{DirectorySource, RecordSource, collect_records, read_records};
pub use csv_source::read_csv_records;
pub use json_source::read_json_records;
pub use xml_source::read_xml_records;
