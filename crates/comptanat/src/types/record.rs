use serde::{Deserialize, Serialize};

use super::FieldValue;

/// A single row of the stacked national-accounts table.
///
/// Rows are produced by an external loader that stacks the yearly source
/// files into one table. Multiple rows may share a
/// `(code, institution, ressources)` triple across different years; no two
/// rows share all of `(code, institution, ressources, year)`.
///
/// # Example
///
/// ```
/// use comptanat::Record;
///
/// let row = Record::new("D41", "S2", false, 1999, "Interets", 10.0);
/// assert_eq!(row.code, "D41");
/// assert_eq!(row.field("year"), Some(comptanat::FieldValue::Year(1999)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Account-entry identifier (e.g. `D41`, `B1g/PIB`).
    pub code: String,
    /// Institutional sector code (e.g. `S1`, `S2`).
    pub institution: String,
    /// Resource side of the account when true, use side when false.
    pub ressources: bool,
    /// Accounting year.
    pub year: i32,
    /// Free-text description of the entry.
    pub description: String,
    /// Recorded value.
    pub value: f64,
}

impl Record {
    /// Column names of the stacked table schema.
    pub const COLUMNS: [&'static str; 6] = [
        "code",
        "institution",
        "ressources",
        "year",
        "description",
        "value",
    ];

    pub fn new(
        code: impl Into<String>,
        institution: impl Into<String>,
        ressources: bool,
        year: i32,
        description: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            code: code.into(),
            institution: institution.into(),
            ressources,
            year,
            description: description.into(),
            value,
        }
    }

    /// Whether `column` names a column of the table schema.
    pub fn has_column(column: &str) -> bool {
        Self::COLUMNS.contains(&column)
    }

    /// Read a column by name. Returns `None` for a name outside the schema;
    /// callers that must surface a schema error check [`Record::has_column`]
    /// first.
    pub fn field(&self, column: &str) -> Option<FieldValue> {
        match column {
            "code" => Some(FieldValue::Text(self.code.clone())),
            "institution" => Some(FieldValue::Text(self.institution.clone())),
            "ressources" => Some(FieldValue::Flag(self.ressources)),
            "year" => Some(FieldValue::Year(self.year)),
            "description" => Some(FieldValue::Text(self.description.clone())),
            "value" => Some(FieldValue::Number(self.value)),
            _ => None,
        }
    }
}
