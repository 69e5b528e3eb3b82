//! Core data model for batch ETL jobs.
//!
//! A job reads rows from heterogeneous flat-file sources into a single
//! [`RecordSet`], transforms it in place, and hands it to one or more sinks.
//! Every record in a set shares one [`Schema`], fixed at configuration time.

mod record;
mod schema;
mod value;

pub use record::{Record, RecordSet};
pub use schema::{Field, FieldType, Schema};
pub use value::{Value, format_value};
