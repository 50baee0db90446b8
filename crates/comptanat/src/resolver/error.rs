//! Error types for the row filter and the variable resolver.

use thiserror::Error;

use crate::formula::{EvalError, ParseError};

/// Errors that occur while filtering rows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// A constraint referenced a column absent from the table schema.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },
}

/// An error that occurred during variable resolution.
///
/// Absence of data is not an error: a direct variable with no matching rows
/// resolves to an empty series. Every variant here is fatal for the
/// resolution path that produced it and propagates unmodified to the
/// top-level caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// The row filter rejected a constraint set.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// A variable name (top-level or referenced by a formula) is absent
    /// from the registry.
    #[error("variable not found: '{name}'{}", format_suggestions(suggestions))]
    UnknownVariable {
        name: String,
        suggestions: Vec<String>,
    },

    /// A direct lookup produced conflicting values for one year, which
    /// indicates a malformed registry entry.
    #[error("ambiguous match for '{variable}': conflicting values for year {year}")]
    AmbiguousMatch { variable: String, year: i32 },

    /// A variable was re-entered before its own resolution completed.
    #[error("cyclic formula reference: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// Formula nesting exceeded the resolution depth limit.
    #[error("maximum resolution depth exceeded at '{variable}'")]
    MaxDepthExceeded { variable: String },

    /// A formula failed to parse.
    #[error("invalid formula for '{variable}': {source}")]
    Formula {
        variable: String,
        #[source]
        source: ParseError,
    },

    /// A component series does not share the formula's year index.
    #[error("component '{component}' of '{variable}' is not aligned with the formula's year index")]
    MisalignedSeries { variable: String, component: String },

    /// The formula failed to evaluate numerically.
    #[error("cannot evaluate '{formula}' for '{variable}': {source}")]
    Evaluation {
        variable: String,
        formula: String,
        #[source]
        source: EvalError,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

/// Compute "did you mean" suggestions for an unknown variable name.
///
/// Candidates are ranked by Jaro-Winkler similarity; only close matches
/// (>= 0.85) are kept, at most three.
pub fn compute_suggestions<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let score = strsim::jaro_winkler(input, candidate);
            (score >= 0.85).then_some((score, candidate))
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
