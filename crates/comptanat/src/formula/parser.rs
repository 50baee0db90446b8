//! Formula string parser using winnow.
//!
//! Grammar, loosest to tightest binding:
//! - additive: `+` `-`
//! - multiplicative: `*` `/`
//! - power: `^` (right-associative)
//! - atoms: numeric literals, variable identifiers, parenthesized
//!   subexpressions
//!
//! No functions or unary operators are defined; negative constants are
//! written as signed literals (`X * -1`).

use winnow::ascii::float;
use winnow::combinator::{alt, delimited, opt};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use super::ast::{BinaryOp, Expr};
use super::error::ParseError;

/// Parse a formula string into an expression tree.
pub fn parse_formula(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let mut remaining = input;
    match formula(&mut remaining) {
        Ok(expr) => {
            if remaining.is_empty() {
                Ok(expr)
            } else {
                Err(ParseError::Syntax {
                    column: column_of(input, remaining),
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                })
            }
        }
        Err(e) => Err(ParseError::Syntax {
            column: column_of(input, remaining),
            message: format!("parse error: {e}"),
        }),
    }
}

/// 1-based column of the first unconsumed character.
fn column_of(original: &str, remaining: &str) -> usize {
    original.len() - remaining.len() + 1
}

/// Parse a complete formula, consuming trailing whitespace.
fn formula(input: &mut &str) -> ModalResult<Expr> {
    let expr = additive(input)?;
    let _ = ws(input)?;
    Ok(expr)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

/// Parse an additive chain: term (('+' | '-') term)*
fn additive(input: &mut &str) -> ModalResult<Expr> {
    let mut lhs = multiplicative(input)?;
    loop {
        let _ = ws(input)?;
        let op: Option<char> = opt(one_of(['+', '-'])).parse_next(input)?;
        let Some(op) = op else { return Ok(lhs) };
        let rhs = multiplicative(input)?;
        let op = if op == '+' { BinaryOp::Add } else { BinaryOp::Sub };
        lhs = Expr::binary(op, lhs, rhs);
    }
}

/// Parse a multiplicative chain: factor (('*' | '/') factor)*
fn multiplicative(input: &mut &str) -> ModalResult<Expr> {
    let mut lhs = power(input)?;
    loop {
        let _ = ws(input)?;
        let op: Option<char> = opt(one_of(['*', '/'])).parse_next(input)?;
        let Some(op) = op else { return Ok(lhs) };
        let rhs = power(input)?;
        let op = if op == '*' { BinaryOp::Mul } else { BinaryOp::Div };
        lhs = Expr::binary(op, lhs, rhs);
    }
}

/// Parse a power expression: atom ('^' power)?
///
/// Right recursion makes `^` right-associative: `A ^ B ^ C` is `A ^ (B ^ C)`.
fn power(input: &mut &str) -> ModalResult<Expr> {
    let base = atom(input)?;
    let _ = ws(input)?;
    let caret: Option<char> = opt('^').parse_next(input)?;
    if caret.is_some() {
        let exponent = power(input)?;
        Ok(Expr::binary(BinaryOp::Pow, base, exponent))
    } else {
        Ok(base)
    }
}

/// Parse an atom: parenthesized subexpression, variable, or numeric literal.
///
/// Variables are tried before literals: `float` accepts the words `inf`
/// and `nan`, which would otherwise claim identifiers starting with those
/// letters. Real literals are unaffected since identifiers cannot start
/// with a digit or sign.
fn atom(input: &mut &str) -> ModalResult<Expr> {
    let _ = ws(input)?;
    alt((parens, variable, number)).parse_next(input)
}

/// Parse a parenthesized subexpression.
fn parens(input: &mut &str) -> ModalResult<Expr> {
    delimited('(', additive, (ws, ')')).parse_next(input)
}

/// Parse a numeric literal.
fn number(input: &mut &str) -> ModalResult<Expr> {
    float.map(Expr::Number).parse_next(input)
}

/// Parse a variable identifier.
fn variable(input: &mut &str) -> ModalResult<Expr> {
    identifier
        .map(|name: &str| Expr::Variable(name.to_string()))
        .parse_next(input)
}

/// Parse an identifier: starts with a letter or underscore, continues with
/// letters, digits, or underscores.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_ident_cont)
        .verify(|s: &str| s.starts_with(is_ident_start))
        .parse_next(input)
}

/// Check if a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
