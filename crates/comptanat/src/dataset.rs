//! User-facing dataset facade.
//!
//! [`Dataset`] pairs a stacked table with a variable registry and exposes
//! the lookup and resolution operations as methods, so callers that work
//! with one dataset do not have to thread the table and registry through
//! every call.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use bon::Builder;

use crate::resolver::{
    FilterError, ResolveError, ResolvedVariable, VariableDef, VariableRegistry, filter_many,
    filter_rows, resolve, resolve_many,
};
use crate::types::{SeriesFrame, Table};

/// A stacked national-accounts table paired with a variable registry.
///
/// The table is supplied by an external loader; the registry maps variable
/// names to direct filter constraints or formulas. Year ranges are always
/// explicit arguments: the dataset never assumes a default historical span.
///
/// # Example
///
/// ```
/// use comptanat::{Dataset, Record, Table, VariableDef, VariableRegistry};
///
/// let mut table = Table::new();
/// table.push(Record::new("D41", "S2", false, 1999, "Interets verses par RDM", 10.0));
///
/// let mut registry = VariableRegistry::new();
/// registry.insert(
///     "Interets_verses_par_rdm",
///     VariableDef::new().code("D41").institution("S2").ressources(false),
/// );
///
/// let dataset = Dataset::builder().table(table).registry(registry).build();
/// let resolved = dataset.resolve("Interets_verses_par_rdm", &(1999..=1999)).unwrap();
/// assert_eq!(resolved.series.get(1999), Some(10.0));
/// assert_eq!(resolved.formula, "Interets_verses_par_rdm");
/// ```
#[derive(Debug, Builder)]
pub struct Dataset {
    /// Stacked table of account rows.
    table: Table,

    /// Variable definitions. May be empty, in which case resolution
    /// degenerates to direct lookups by code.
    #[builder(default)]
    registry: VariableRegistry,
}

impl Dataset {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    /// Filter the table rows matching one constraint set within `years`.
    pub fn look_up(
        &self,
        def: &VariableDef,
        years: &RangeInclusive<i32>,
    ) -> Result<Table, FilterError> {
        filter_rows(&self.table, def, years)
    }

    /// Union several lookups into one deduplicated table.
    pub fn look_many(
        &self,
        defs: &[VariableDef],
        years: &RangeInclusive<i32>,
    ) -> Result<Table, FilterError> {
        filter_many(&self.table, defs, years)
    }

    /// Resolve a single variable against this dataset.
    pub fn resolve(
        &self,
        name: &str,
        years: &RangeInclusive<i32>,
    ) -> Result<ResolvedVariable, ResolveError> {
        resolve(&self.table, name, &self.registry, years)
    }

    /// Resolve every registry variable into a combined frame plus the
    /// expanded formulas of the derived variables.
    pub fn resolve_all(
        &self,
        years: &RangeInclusive<i32>,
    ) -> Result<(SeriesFrame, BTreeMap<String, String>), ResolveError> {
        resolve_many(&self.table, &self.registry, years)
    }
}
