//! Resolution of named economic variables over a stacked national-accounts
//! table.
//!
//! The table is a flat stack of `(code, institution, ressources, year,
//! description, value)` rows supplied by an external loader. A
//! [`VariableRegistry`] maps variable names to either direct filter
//! constraints or an algebraic formula over other variables; resolution
//! either locates a variable in the table or computes it recursively from
//! its formula components, returning a year-indexed [`Series`] together
//! with the fully expanded derivation text.

pub mod formula;
pub mod resolver;
pub mod types;

mod dataset;

pub use dataset::Dataset;
pub use formula::{BinaryOp, Expr, ParseError};
pub use resolver::{
    FilterError, ResolveError, ResolvedVariable, VariableDef, VariableRegistry,
};
pub use types::{FieldValue, Record, Series, SeriesFrame, Table};

/// Creates a [`Table`] from row tuples.
///
/// Each row is `(code, institution, ressources, year, description, value)`,
/// converted via [`Record::new`].
///
/// # Example
///
/// ```
/// use comptanat::table;
///
/// let t = table![
///     ("D41", "S2", false, 1999, "Interets", 10.0),
///     ("D42", "S2", false, 1999, "Dividendes", 5.0),
/// ];
/// assert_eq!(t.len(), 2);
/// ```
#[macro_export]
macro_rules! table {
    {} => {
        $crate::Table::new()
    };
    { $(($code:expr, $institution:expr, $ressources:expr, $year:expr, $description:expr, $value:expr)),+ $(,)? } => {
        {
            let mut table = $crate::Table::new();
            $(
                table.push($crate::Record::new(
                    $code,
                    $institution,
                    $ressources,
                    $year,
                    $description,
                    $value,
                ));
            )+
            table
        }
    };
}
