//! Parsing and evaluation of algebraic variable formulas.
//!
//! A formula is an arithmetic expression over other variable names, e.g.
//! `Interets_verses_par_rdm + Dividendes_verses_par_rdm_D42`. This module
//! turns formula text into an [`Expr`] tree and evaluates the tree against
//! resolved component values; the resolver decides where those values come
//! from.

mod ast;
mod error;
mod parser;

pub use ast::{BinaryOp, Expr};
pub use error::{EvalError, ParseError};
pub use parser::parse_formula;
