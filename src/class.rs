//! Class and instance storage: method tables with single-inheritance lookup.

use crate::ast::FnDef;
use crate::fn_native::Shared;
use crate::scope::Scope;
use crate::{Identifier, Value};
use std::cell::RefCell;
use std::collections::HashMap;

/// A user-defined method: its declaration plus the environment it closes
/// over (the module/file-level scope it was defined in, not the class body
/// — Pyrite classes don't introduce their own lexical scope for methods).
#[derive(Clone)]
pub struct Method {
    pub def: Shared<FnDef>,
    pub closure: Scope,
}

/// A `class Name(Base): ...` declaration, resolved to a method table plus an
/// optional link to its superclass.
pub struct Class {
    pub name: Identifier,
    pub base: Option<Shared<Class>>,
    pub methods: HashMap<Identifier, Method>,
}

/// Look up a method by name starting at `class`, walking up the
/// single-inheritance chain. Returns the class that actually declares the
/// method alongside it (not necessarily `class` itself), needed so
/// `super.method()` resolves relative to *that* class's base, not the
/// instance's concrete class.
#[must_use]
pub fn resolve_method(class: &Shared<Class>, name: &str) -> Option<(Shared<Class>, Method)> {
    if let Some(m) = class.methods.get(name) {
        return Some((class.clone(), m.clone()));
    }
    let base = class.base.as_ref()?;
    resolve_method(base, name)
}

/// A live instance of a [`Class`]: its own attribute map plus a reference
/// back to the class that created it.
pub struct Instance {
    pub class: Shared<Class>,
    pub attrs: RefCell<HashMap<Identifier, Value>>,
}

impl Instance {
    #[must_use]
    pub fn new(class: Shared<Class>) -> Self {
        Self {
            class,
            attrs: RefCell::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<Value> {
        self.attrs.borrow().get(name).cloned()
    }

    pub fn set_attr(&self, name: impl Into<Identifier>, value: Value) {
        self.attrs.borrow_mut().insert(name.into(), value);
    }
}
