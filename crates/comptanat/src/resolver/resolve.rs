//! Recursive variable resolution.
//!
//! Resolution ties together the registry, the row filter, and formula
//! evaluation: a direct variable is looked up in the table; a derived
//! variable is computed by resolving each formula component recursively and
//! evaluating the expression tree per year. No results are cached: a
//! dependency shared by several formulas is re-resolved per reference, so a
//! top-level call is a pure function of its inputs.

use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;

use super::context::ResolveContext;
use super::error::{ResolveError, compute_suggestions};
use super::filter::filter_rows;
use super::registry::{VariableDef, VariableRegistry};
use crate::formula::parse_formula;
use crate::types::{Series, SeriesFrame, Table};

/// The outcome of resolving a single variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariable {
    /// Year-indexed values, named after the variable. Empty when the
    /// variable is absent from the dataset and year range.
    pub series: Series,
    /// Fully expanded derivation text: the variable's own name for a direct
    /// lookup, the formula with every component replaced by its
    /// parenthesized expansion for a derived variable, and empty for an
    /// absent variable.
    pub formula: String,
}

/// Resolve a single variable to a year-indexed series and its expanded
/// formula.
///
/// With an empty registry the name degenerates to a direct lookup by
/// `code`. Otherwise the name must be a registry key; near-miss names are
/// reported with suggestions. The year range is passed unchanged to every
/// nested resolution.
pub fn resolve(
    table: &Table,
    name: &str,
    registry: &VariableRegistry,
    years: &RangeInclusive<i32>,
) -> Result<ResolvedVariable, ResolveError> {
    let mut ctx = ResolveContext::new();
    resolve_in(table, name, registry, years, &mut ctx)
}

fn resolve_in(
    table: &Table,
    name: &str,
    registry: &VariableRegistry,
    years: &RangeInclusive<i32>,
    ctx: &mut ResolveContext,
) -> Result<ResolvedVariable, ResolveError> {
    // An absent registry degenerates to a single-column lookup by code.
    let fallback;
    let def = if registry.is_empty() {
        fallback = VariableDef::new().code(name);
        &fallback
    } else {
        registry
            .get(name)
            .ok_or_else(|| ResolveError::UnknownVariable {
                name: name.to_string(),
                suggestions: compute_suggestions(name, registry.names()),
            })?
    };

    let rows = filter_rows(table, def, years)?;

    if !rows.is_empty() {
        return Ok(ResolvedVariable {
            series: reindex_by_year(name, &rows)?,
            formula: name.to_string(),
        });
    }

    let Some(formula) = def.formula.as_deref() else {
        // Absence is a valid terminal state, not an error.
        return Ok(ResolvedVariable {
            series: Series::new(name),
            formula: String::new(),
        });
    };

    let expr = parse_formula(formula).map_err(|source| ResolveError::Formula {
        variable: name.to_string(),
        source,
    })?;
    let components = expr.variables();

    ctx.push(name)?;
    let mut resolved: Vec<(String, Series)> = Vec::with_capacity(components.len());
    let mut expanded = formula.to_string();
    for component in &components {
        let child = resolve_in(table, component, registry, years, ctx)?;
        expanded = substitute(&expanded, component, &format!("({})", child.formula));
        resolved.push((component.clone(), child.series));
    }
    ctx.pop();

    // All components resolved over the same year range, so they are expected
    // to share one year index; take it from the last-resolved component and
    // refuse to guess a join strategy when another component disagrees.
    let index: Vec<i32> = resolved
        .last()
        .map(|(_, series)| series.years().collect())
        .unwrap_or_default();
    if let Some((_, reference)) = resolved.last() {
        for (component, series) in &resolved {
            if !series.same_years(reference) {
                return Err(ResolveError::MisalignedSeries {
                    variable: name.to_string(),
                    component: component.clone(),
                });
            }
        }
    }

    let mut series = Series::new(name);
    let mut bindings: HashMap<String, f64> = HashMap::with_capacity(resolved.len());
    for year in index {
        bindings.clear();
        for (component, component_series) in &resolved {
            if let Some(value) = component_series.get(year) {
                bindings.insert(component.clone(), value);
            }
        }
        let value = expr
            .evaluate(&bindings)
            .map_err(|source| ResolveError::Evaluation {
                variable: name.to_string(),
                formula: formula.to_string(),
                source,
            })?;
        series.insert(year, value);
    }

    Ok(ResolvedVariable {
        series,
        formula: expanded,
    })
}

/// Re-index direct-lookup rows by year into a one-column series.
///
/// Identical duplicate rows collapse; two rows carrying different values
/// for the same year indicate a malformed registry entry.
fn reindex_by_year(name: &str, rows: &Table) -> Result<Series, ResolveError> {
    let mut values: BTreeMap<i32, f64> = BTreeMap::new();
    for record in rows {
        if let Some(existing) = values.get(&record.year) {
            if *existing != record.value {
                return Err(ResolveError::AmbiguousMatch {
                    variable: name.to_string(),
                    year: record.year,
                });
            }
        } else {
            values.insert(record.year, record.value);
        }
    }
    Ok(Series::from_values(name, values))
}

/// Replace standalone occurrences of `name` in `text` with `replacement`.
///
/// The substitution is textual, but identifier-boundary aware: an
/// occurrence embedded in a longer identifier (`X` inside `X2`) is left
/// alone.
fn substitute(text: &str, name: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut i = 0;
    while i < text.len() {
        let tail = &text[i..];
        let boundary_before = prev.is_none_or(|c| !is_ident_char(c));
        if boundary_before
            && tail.starts_with(name)
            && !tail[name.len()..].starts_with(is_ident_char)
        {
            out.push_str(replacement);
            prev = name.chars().last();
            i += name.len();
        } else {
            let Some(c) = tail.chars().next() else { break };
            out.push(c);
            prev = Some(c);
            i += c.len_utf8();
        }
    }
    out
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Resolve every registry variable into a combined frame plus the expanded
/// formulas of the derived variables.
///
/// Variables are visited, and result columns appended, in registry
/// insertion order. Formula map keys are human-readable variable names
/// (underscores replaced by spaces). Variables flagged `drop` are fully
/// resolved but excluded from the frame. Any single failure aborts the
/// whole batch.
pub fn resolve_many(
    table: &Table,
    registry: &VariableRegistry,
    years: &RangeInclusive<i32>,
) -> Result<(SeriesFrame, BTreeMap<String, String>), ResolveError> {
    let mut frame = SeriesFrame::new();
    let mut formulas: BTreeMap<String, String> = BTreeMap::new();

    for (name, def) in registry.iter() {
        let variable = resolve(table, name, registry, years)?;
        if def.formula.is_some() {
            formulas.insert(name.replace('_', " "), variable.formula);
        }
        if !def.drop {
            frame.push(variable.series);
        }
    }

    Ok((frame, formulas))
}
