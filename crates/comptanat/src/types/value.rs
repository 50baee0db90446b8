use serde::{Deserialize, Serialize};

/// A dynamically typed column value used in filter constraints.
///
/// `PartialEq` is variant-strict: `Year(1999)` never equals
/// `Number(1999.0)`. The row filter widens numeric variants when applying
/// constraints, so an integer-shaped constraint still matches a float
/// column.
///
/// # Example
///
/// ```
/// use comptanat::FieldValue;
///
/// let code: FieldValue = "D41".into();
/// assert_eq!(code.as_text(), Some("D41"));
///
/// let side: FieldValue = false.into();
/// assert_eq!(side.as_flag(), Some(false));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A string column (`code`, `institution`, `description`).
    Text(String),
    /// The `ressources` flag.
    Flag(bool),
    /// The `year` column.
    Year(i32),
    /// The `value` column.
    Number(f64),
}

impl FieldValue {
    /// Get this value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a boolean flag, if it is one.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Get this value as a year, if it is one.
    pub fn as_year(&self) -> Option<i32> {
        match self {
            FieldValue::Year(y) => Some(*y),
            _ => None,
        }
    }

    /// Get this value as a number. Years widen to `f64`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            FieldValue::Year(y) => Some(f64::from(*y)),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Year(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}
