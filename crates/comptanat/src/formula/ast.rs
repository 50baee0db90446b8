//! Expression tree for algebraic variable formulas.
//!
//! Formulas are parsed once into this tree and then evaluated against a
//! name-to-value binding, one year at a time. There is no dynamic
//! evaluation of formula text anywhere in the crate.

use std::collections::HashMap;

use super::error::EvalError;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// `^` in formula text; evaluates via `f64::powf`.
    Pow,
}

/// A parsed algebraic formula.
///
/// Leaves are numeric literals and variable names; interior nodes are the
/// five supported binary operators.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub(crate) fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Distinct variable names referenced by this expression, in
    /// first-appearance order (left to right).
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut Vec<String>) {
        match self {
            Expr::Number(_) => {}
            Expr::Variable(name) => {
                if !names.iter().any(|n| n == name) {
                    names.push(name.clone());
                }
            }
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(names);
                rhs.collect_variables(names);
            }
        }
    }

    /// Evaluate this expression against a name-to-value binding.
    pub fn evaluate(&self, bindings: &HashMap<String, f64>) -> Result<f64, EvalError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Variable(name) => {
                bindings
                    .get(name)
                    .copied()
                    .ok_or_else(|| EvalError::UnboundVariable { name: name.clone() })
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate(bindings)?;
                let rhs = rhs.evaluate(bindings)?;
                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Sub => Ok(lhs - rhs),
                    BinaryOp::Mul => Ok(lhs * rhs),
                    BinaryOp::Div => {
                        if rhs == 0.0 {
                            Err(EvalError::DivisionByZero)
                        } else {
                            Ok(lhs / rhs)
                        }
                    }
                    BinaryOp::Pow => Ok(lhs.powf(rhs)),
                }
            }
        }
    }
}
