use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A named, year-indexed series of values.
///
/// Years without data are simply absent from the index; an empty series is
/// the valid terminal state for a variable not present in the dataset or
/// requested year range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    values: BTreeMap<i32, f64>,
}

impl Series {
    /// Create an empty series with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Create a series from `(year, value)` pairs.
    pub fn from_values(name: impl Into<String>, values: impl IntoIterator<Item = (i32, f64)>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value for `year`, if present.
    pub fn get(&self, year: i32) -> Option<f64> {
        self.values.get(&year).copied()
    }

    /// Set the value for `year`, replacing any existing one.
    pub fn insert(&mut self, year: i32, value: f64) {
        self.values.insert(year, value);
    }

    /// Years with data, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.values.keys().copied()
    }

    /// `(year, value)` pairs in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> {
        self.values.iter().map(|(year, value)| (*year, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether this series carries exactly the same year index as `other`.
    pub fn same_years(&self, other: &Series) -> bool {
        self.values.len() == other.values.len() && self.years().eq(other.years())
    }
}

/// An ordered collection of series columns sharing a year row index.
///
/// Columns keep the order in which they were pushed; the row index is the
/// union of the column indices, so columns of different lengths coexist and
/// missing cells read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesFrame {
    columns: Vec<Series>,
}

impl SeriesFrame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn push(&mut self, series: Series) {
        self.columns.push(series);
    }

    /// Columns in insertion order.
    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Series> {
        self.columns.iter().find(|series| series.name() == name)
    }

    /// Union of all column year indices, ascending.
    pub fn years(&self) -> BTreeSet<i32> {
        self.columns.iter().flat_map(Series::years).collect()
    }

    /// Cell access by column name and year.
    pub fn value(&self, name: &str, year: i32) -> Option<f64> {
        self.column(name).and_then(|series| series.get(year))
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
