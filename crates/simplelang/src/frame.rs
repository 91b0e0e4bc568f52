//! The frame stack (spec.md §4.4): name → value bindings, with wind/unwind
//! snapshot semantics.
//!
//! Rather than literally materializing a parent pointer per frame, `Frames`
//! keeps the whole chain as a stack of independent snapshots — `wind()`
//! pushes a clone of the current top, `unwind()` pops it. This is
//! observably identical to "new frame copies caller's bindings, parent link
//! points at caller" (spec.md's own design note calls out that a naïve
//! per-call deep copy is an acceptable implementation), while avoiding any
//! need for shared/aliased frame references.

use ahash::AHashMap;

use crate::{
    error::RunError,
    resource::ResourceLimits,
    value::Value,
};

/// The variable-binding stack plus the recursion-depth guard.
///
/// Index 0 (the bottom of the stack) is the global frame, live for the
/// whole program/REPL session. `wind()`/`unwind()` push/pop frames for user
/// function calls; builtin calls never wind.
#[derive(Debug)]
pub struct Frames {
    stack: Vec<AHashMap<String, Value>>,
    limits: ResourceLimits,
}

impl Default for Frames {
    fn default() -> Self {
        Self::new(ResourceLimits::default())
    }
}

impl Frames {
    #[must_use]
    pub fn new(limits: ResourceLimits) -> Self {
        Self {
            stack: vec![AHashMap::default()],
            limits,
        }
    }

    /// Current nesting depth (1 for the global frame alone).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn current(&self) -> &AHashMap<String, Value> {
        self.stack.last().expect("frame stack is never empty")
    }

    fn current_mut(&mut self) -> &mut AHashMap<String, Value> {
        self.stack.last_mut().expect("frame stack is never empty")
    }

    /// Stores `value.copy()` in the current frame (spec.md §4.4).
    pub fn assign_variable(&mut self, name: &str, value: &Value) {
        self.current_mut().insert(name.to_owned(), value.copy());
    }

    /// Returns the binding in the current frame, or `None` ("absent").
    #[must_use]
    pub fn lookup_variable(&self, name: &str) -> Option<&Value> {
        self.current().get(name)
    }

    /// Pushes a new current frame whose bindings are a snapshot of the
    /// caller's. Fails with `Error-recursion` if the configured depth would
    /// be exceeded.
    ///
    /// # Errors
    /// Returns `Error-recursion` if `depth() + 1` would exceed
    /// `limits.max_recursion_depth`.
    pub fn wind(&mut self) -> Result<(), RunError> {
        if self.stack.len() >= self.limits.max_recursion_depth {
            return Err(RunError::recursion(self.limits.max_recursion_depth));
        }
        let snapshot = self.current().clone();
        self.stack.push(snapshot);
        log::trace!("wind: frame depth now {}", self.stack.len());
        Ok(())
    }

    /// Replaces the current frame with its parent (pops the top snapshot).
    ///
    /// # Panics
    /// Panics if called without a matching `wind()` (would pop the global
    /// frame) — this indicates an interpreter bug, not a user error.
    pub fn unwind(&mut self) {
        self.stack.pop().expect("unwind without matching wind");
        assert!(!self.stack.is_empty(), "unwound past the global frame");
        log::trace!("unwind: frame depth now {}", self.stack.len());
    }
}
