use std::slice;

use serde::{Deserialize, Serialize};

use super::Record;

/// An owned, immutable-by-convention stack of account rows.
///
/// The filter facility clones matching rows out of the table rather than
/// mutating it, so one table can back any number of resolution calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from a vector of rows.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Append a row.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// All rows, in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
