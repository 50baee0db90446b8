//! Error types for formula parsing and evaluation.

use thiserror::Error;

/// An error that occurred while parsing a formula string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A syntax error with column information (1-based).
    #[error("syntax error at column {column}: {message}")]
    Syntax { column: usize, message: String },

    /// The formula string is empty or whitespace only.
    #[error("empty formula")]
    Empty,
}

/// An error that occurred while evaluating an expression tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The right operand of a division is zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A variable leaf has no value in the bindings.
    #[error("unbound variable '{name}'")]
    UnboundVariable { name: String },
}
