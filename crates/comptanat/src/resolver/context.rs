//! Resolution context tracking state through recursive resolution.

use super::error::ResolveError;

/// Tracks the stack of variables currently being resolved.
///
/// The registry is trusted to be acyclic, but a malformed one must fail
/// fast instead of recursing forever: re-entering a variable before its own
/// resolution completes is reported as a cyclic reference, and nesting
/// deeper than the depth limit (default 64) is cut off.
#[derive(Debug)]
pub struct ResolveContext {
    /// In-progress variable names, outermost first.
    stack: Vec<String>,
    /// Maximum allowed nesting depth.
    max_depth: usize,
}

impl ResolveContext {
    /// Create a new context with the default depth limit.
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            max_depth: 64,
        }
    }

    /// Create a context with a custom depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            stack: Vec::new(),
            max_depth,
        }
    }

    /// Check if a variable is currently being resolved.
    pub fn is_in_progress(&self, name: &str) -> bool {
        self.stack.iter().any(|n| n == name)
    }

    /// Push a variable onto the resolution stack.
    ///
    /// Returns an error if the depth limit is exceeded or the variable is
    /// already on the stack (a formula cycle).
    pub fn push(&mut self, name: &str) -> Result<(), ResolveError> {
        if self.stack.len() >= self.max_depth {
            return Err(ResolveError::MaxDepthExceeded {
                variable: name.to_string(),
            });
        }
        if self.is_in_progress(name) {
            let mut chain = self.stack.clone();
            chain.push(name.to_string());
            return Err(ResolveError::CyclicReference { chain });
        }
        self.stack.push(name.to_string());
        Ok(())
    }

    /// Pop the most recent variable from the stack.
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// Current stack, for error reporting.
    pub fn stack(&self) -> &[String] {
        &self.stack
    }
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self::new()
    }
}
