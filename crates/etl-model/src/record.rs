//! Records and record sets.

use serde::{Deserialize, Serialize};

use crate::schema::Schema;
use crate::value::Value;

/// One row: values stored positionally against the owning set's [`Schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.values.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered collection of records sharing one schema.
///
/// Insertion order is extraction order; duplicates are preserved. The whole
/// set is materialized in memory (batch-size assumption, not a streaming
/// design), and grows append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    schema: Schema,
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    pub fn with_capacity(schema: Schema, capacity: usize) -> Self {
        Self {
            schema,
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append one record. The record must have one value per schema field.
    pub fn push(&mut self, record: Record) {
        debug_assert_eq!(record.len(), self.schema.len());
        self.records.push(record);
    }

    /// Append all records from another set sharing the same schema.
    pub fn extend(&mut self, other: RecordSet) {
        debug_assert_eq!(other.schema, self.schema);
        self.records.extend(other.records);
    }

    /// Value of a named field in a given row.
    pub fn value(&self, row: usize, field: &str) -> Option<&Value> {
        let index = self.schema.index_of(field)?;
        self.records.get(row)?.get(index)
    }
}
