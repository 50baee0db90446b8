//! Row filtering and recursive variable resolution.
//!
//! This module provides the lookup facility over the stacked table
//! ([`filter_rows`], [`filter_many`]) and the resolution engine that turns
//! registry definitions into year-indexed series ([`resolve`],
//! [`resolve_many`]), recursing through formulas with cycle detection.

mod context;
mod error;
mod filter;
mod registry;
mod resolve;

pub use context::ResolveContext;
pub use error::{FilterError, ResolveError, compute_suggestions};
pub use filter::{filter_many, filter_rows};
pub use registry::{VariableDef, VariableRegistry};
pub use resolve::{ResolvedVariable, resolve, resolve_many};
