//! Lexically-scoped variable environments.
//!
//! Closures must observe later mutation of a captured variable by the
//! enclosing scope, so a flat, snapshot-on-capture scope won't do. Instead a
//! [`Scope`] is a link in a parent-pointer chain; each link owns a
//! `Rc<RefCell<_>>` map, so cloning a [`Scope`] handle (to store inside a
//! closure) shares the same underlying bindings.

use crate::{Identifier, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct ScopeData {
    vars: HashMap<Identifier, Value>,
    parent: Option<Scope>,
}

/// A lexical environment: a map of names to values, plus an optional link to
/// the enclosing scope it was created inside.
#[derive(Clone)]
pub struct Scope(Rc<RefCell<ScopeData>>);

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    /// Create a fresh, parentless scope (used for the top level of a script).
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(ScopeData {
            vars: HashMap::new(),
            parent: None,
        })))
    }

    /// Create a child scope nested inside `self` (used for function bodies,
    /// `if`/`while`/`for` suites, and `lambda` bodies).
    #[must_use]
    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(ScopeData {
            vars: HashMap::new(),
            parent: Some(self.clone()),
        })))
    }

    /// Bind `name` to `value` in *this* scope, shadowing any outer binding.
    pub fn define(&self, name: impl Into<Identifier>, value: Value) {
        self.0.borrow_mut().vars.insert(name.into(), value);
    }

    /// Look up `name`, searching outward through enclosing scopes.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        let data = self.0.borrow();
        if let Some(v) = data.vars.get(name) {
            return Some(v.clone());
        }
        data.parent.as_ref().and_then(|p| p.get(name))
    }

    /// Assign to the nearest existing binding of `name`, searching outward.
    /// Returns `false` if no such binding exists anywhere in the chain.
    pub fn assign(&self, name: &str, value: Value) -> bool {
        let mut data = self.0.borrow_mut();
        if let Some(slot) = data.vars.get_mut(name) {
            *slot = value;
            return true;
        }
        match &data.parent {
            Some(p) => p.assign(name, value),
            None => false,
        }
    }

    /// True if `name` is bound in this scope or any enclosing one.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        let data = self.0.borrow();
        data.vars.contains_key(name) || data.parent.as_ref().is_some_and(|p| p.contains(name))
    }
}
