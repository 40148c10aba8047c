//! Builder-style setters for [`Engine`]'s resource [`Limits`].

use crate::engine::{Engine, Limits};

impl Engine {
    /// Maximum function/method call nesting depth before a
    /// [`crate::RuntimeError::RecursionError`] is raised. Default 1000.
    pub fn set_max_call_levels(&mut self, levels: usize) -> &mut Self {
        self.limits.max_call_levels = levels;
        self
    }

    /// Maximum number of AST-node evaluations (statements + expressions +
    /// loop iterations) a single top-level call may perform before a
    /// [`crate::RuntimeError::TooManyOperations`] is raised. Default 10M.
    pub fn set_max_operations(&mut self, ops: u64) -> &mut Self {
        self.limits.max_operations = ops;
        self
    }

    /// Maximum byte length of any single `str` value. Default 16 MiB.
    pub fn set_max_string_size(&mut self, bytes: usize) -> &mut Self {
        self.limits.max_string_size = bytes;
        self
    }

    /// Maximum element count of any single `list`/`tuple`/`set`/`dict`
    /// value. Default 1,000,000.
    pub fn set_max_collection_size(&mut self, items: usize) -> &mut Self {
        self.limits.max_collection_size = items;
        self
    }

    /// Replace the engine's resource limits wholesale.
    pub fn set_limits(&mut self, limits: Limits) -> &mut Self {
        self.limits = limits;
        self
    }

    /// The engine's current resource limits.
    #[must_use]
    pub fn limits(&self) -> Limits {
        self.limits
    }
}
