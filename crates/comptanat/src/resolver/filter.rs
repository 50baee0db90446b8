//! Row filtering over the stacked table.
//!
//! The filter is the direct-lookup half of variable resolution: a constraint
//! set is applied column by column against the table, narrowed first to the
//! requested year range. All columns match by equality except `description`,
//! which matches by substring containment. A formula-bearing constraint set
//! has no direct row representation and always filters to empty.

use std::ops::RangeInclusive;

use super::error::FilterError;
use super::registry::VariableDef;
use crate::types::{FieldValue, Record, Table};

/// Filter the table down to rows matching `def`'s constraints within
/// `years`.
///
/// Constraints apply in sorted column order. A `None` constraint is
/// skipped. Once a constraint empties the subset, the remaining constraints
/// are skipped and the result is explicitly empty. A constraint on a column
/// outside the table schema is an error, never silently ignored.
///
/// The output preserves row identity and order; duplicates in the input
/// stay duplicated in the output.
pub fn filter_rows(
    table: &Table,
    def: &VariableDef,
    years: &RangeInclusive<i32>,
) -> Result<Table, FilterError> {
    // Formula-bearing definitions resolve through their components instead.
    if def.formula.is_some() {
        return Ok(Table::new());
    }

    let mut subset: Vec<Record> = table
        .iter()
        .filter(|record| years.contains(&record.year))
        .cloned()
        .collect();

    for (column, value) in def.constraints() {
        if subset.is_empty() {
            break;
        }
        let Some(value) = value else { continue };
        if column == "description" {
            match value.as_text() {
                Some(needle) => subset.retain(|record| record.description.contains(needle)),
                None => subset.clear(),
            }
        } else {
            if !Record::has_column(column) {
                return Err(FilterError::UnknownColumn {
                    column: column.to_string(),
                });
            }
            subset.retain(|record| {
                record
                    .field(column)
                    .is_some_and(|actual| constraint_matches(&actual, value))
            });
        }
    }

    Ok(subset.into_iter().collect())
}

/// Constraint equality with numeric widening. Untagged deserialization
/// reads any JSON integer as a year, so an integer-shaped constraint on
/// the `value` column must still match the column's float values.
fn constraint_matches(actual: &FieldValue, expected: &FieldValue) -> bool {
    if actual == expected {
        return true;
    }
    matches!(
        (actual.as_number(), expected.as_number()),
        (Some(a), Some(e)) if a == e
    )
}

/// Union several lookups into one table.
///
/// Each constraint set is filtered independently; results are concatenated
/// preserving per-set row order, then exact-duplicate rows are removed
/// (first occurrence wins).
pub fn filter_many(
    table: &Table,
    defs: &[VariableDef],
    years: &RangeInclusive<i32>,
) -> Result<Table, FilterError> {
    let mut unique: Vec<Record> = Vec::new();
    for def in defs {
        for record in filter_rows(table, def, years)?.iter() {
            if !unique.contains(record) {
                unique.push(record.clone());
            }
        }
    }
    Ok(unique.into_iter().collect())
}
