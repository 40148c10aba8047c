//! The guest value model.
//!
//! Mutable container types (`list`, `dict`, `set`, class instances, open
//! files) carry reference identity: cloning a [`Value::List`] clones the
//! handle, not the underlying vector, so two variables can observe each
//! other's mutations, via a `Shared` handle plus interior mutability.
//! Immutable types (`int`, `float`, `bool`, `str`, `tuple`, `None`) are plain
//! value types.

use crate::class::{Class, Instance};
use crate::fn_native::{NativeFnDef, Shared};
use crate::scope::Scope;
use crate::token::Position;
use crate::vfs::FileHandle;
use crate::{ast::FnDef, error::RuntimeError, ImmutableString, FLOAT, INT};
use indexmap::{IndexMap, IndexSet};
use std::cell::RefCell;
use std::fmt;

/// A guest-defined function or lambda, closing over the scope it was
/// declared in. `bound_self` is set when this is a bound method, in which
/// case it is implicitly prepended as the first call argument.
#[derive(Clone)]
pub struct FuncValue {
    pub def: Shared<FnDef>,
    pub closure: Scope,
    pub bound_self: Option<Value>,
    /// The class that lexically defines this method, if any. Bound at call
    /// time into the `__class__` scope entry so `super.method()` resolves
    /// relative to the defining class's base, not the instance's concrete
    /// class.
    pub defining_class: Option<Shared<Class>>,
}

/// A guest-visible value.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(INT),
    Float(FLOAT),
    Str(ImmutableString),
    List(Shared<RefCell<Vec<Value>>>),
    Tuple(Shared<Vec<Value>>),
    Set(Shared<RefCell<IndexSet<HashKey>>>),
    Dict(Shared<RefCell<IndexMap<HashKey, Value>>>),
    Function(Shared<FuncValue>),
    NativeFunction(Shared<NativeFnDef>),
    Class(Shared<Class>),
    Instance(Shared<Instance>),
    File(Shared<RefCell<FileHandle>>),
}

/// A canonical, hashable projection of a [`Value`], used as the element type
/// of `set` and the key type of `dict`.
///
/// `None`, `bool`, `int`, `float` and `str` are hashable, and numeric values
/// that compare equal hash equal: `hash(1) == hash(1.0) == hash(True)`. This
/// deliberately diverges from naive `Hash for Dynamic`-style implementations
/// that hash the type discriminant first (which would make `1 == 1.0` true
/// while `hash(1) != hash(1.0)`, breaking the hash/eq contract for anyone
/// who then uses the value as a dict key). Large `int` magnitudes beyond
/// `2^53` lose exactness once folded into this representation, matching
/// the same loss an `int`/`float` comparison already has.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    None,
    Num(u64),
    Str(ImmutableString),
    Tuple(Vec<HashKey>),
}

fn canon_float_bits(x: FLOAT) -> u64 {
    let x = if x == 0.0 { 0.0 } else { x };
    if x.is_nan() {
        FLOAT::NAN.to_bits()
    } else {
        x.to_bits()
    }
}

impl HashKey {
    /// Attempt to project `value` into its canonical hashable form.
    pub fn try_from_value(value: &Value, pos: Position) -> Result<Self, RuntimeError> {
        Ok(match value {
            Value::None => Self::None,
            Value::Bool(b) => Self::Num(canon_float_bits(if *b { 1.0 } else { 0.0 })),
            Value::Int(i) => Self::Num(canon_float_bits(*i as FLOAT)),
            Value::Float(x) => Self::Num(canon_float_bits(*x)),
            Value::Str(s) => Self::Str(s.clone()),
            Value::Tuple(items) => {
                let keys = items
                    .iter()
                    .map(|v| Self::try_from_value(v, pos))
                    .collect::<Result<Vec<_>, _>>()?;
                Self::Tuple(keys)
            }
            other => {
                return Err(RuntimeError::HashError(other.type_name().to_string(), pos))
            }
        })
    }
}

impl Value {
    /// The guest-visible type name, used in error messages and by the
    /// built-in `type()` function.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "NoneType",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Set(_) => "set",
            Self::Dict(_) => "dict",
            Self::Function(_) => "function",
            Self::NativeFunction(_) => "function",
            Self::Class(_) => "class",
            Self::Instance(_) => "object",
            Self::File(_) => "file",
        }
    }

    /// Truthiness per the guest language's `if`/`while`/`and`/`or` rules:
    /// `None`, `False`, `0`, `0.0`, `""` and empty containers are falsy;
    /// everything else (including every function, class, instance and open
    /// file) is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(x) => *x != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::List(l) => !l.borrow().is_empty(),
            Self::Tuple(t) => !t.is_empty(),
            Self::Set(s) => !s.borrow().is_empty(),
            Self::Dict(d) => !d.borrow().is_empty(),
            Self::Function(_)
            | Self::NativeFunction(_)
            | Self::Class(_)
            | Self::Instance(_)
            | Self::File(_) => true,
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub fn as_numeric_float(&self) -> Option<FLOAT> {
        match self {
            Self::Int(i) => Some(*i as FLOAT),
            Self::Float(x) => Some(*x),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// `str()`: the human-readable rendering (no quoting of top-level strings).
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Str(s) => s.to_string(),
            _ => self.to_repr_string(),
        }
    }

    /// `repr()`: the unambiguous rendering used for nested container
    /// elements (strings are quoted).
    #[must_use]
    pub fn to_repr_string(&self) -> String {
        match self {
            Self::None => "None".to_string(),
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(x) => format_float(*x),
            Self::Str(s) => format!("{s:?}"),
            Self::List(items) => {
                let inner: Vec<_> = items.borrow().iter().map(Self::to_repr_string).collect();
                format!("[{}]", inner.join(", "))
            }
            Self::Tuple(items) => {
                let inner: Vec<_> = items.iter().map(Self::to_repr_string).collect();
                if inner.len() == 1 {
                    format!("({},)", inner[0])
                } else {
                    format!("({})", inner.join(", "))
                }
            }
            Self::Set(items) => {
                let items = items.borrow();
                if items.is_empty() {
                    return "set()".to_string();
                }
                let inner: Vec<_> = items.iter().map(hashkey_repr).collect();
                format!("{{{}}}", inner.join(", "))
            }
            Self::Dict(items) => {
                let inner: Vec<_> = items
                    .borrow()
                    .iter()
                    .map(|(k, v)| format!("{}: {}", hashkey_repr(k), v.to_repr_string()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            Self::Function(f) => format!("<function {}>", f.def.name.name),
            Self::NativeFunction(f) => format!("<built-in function {}>", f.name),
            Self::Class(c) => format!("<class {}>", c.name),
            Self::Instance(i) => format!("<{} object>", i.class.name),
            Self::File(f) => format!("<file {:?}>", f.borrow().path),
        }
    }
}

fn format_float(x: FLOAT) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else if x == x.trunc() && x.abs() < 1e16 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

fn hashkey_repr(key: &HashKey) -> String {
    match key {
        HashKey::None => "None".to_string(),
        HashKey::Num(bits) => {
            let x = FLOAT::from_bits(*bits);
            if x == x.trunc() {
                format!("{x:.1}")
            } else {
                format!("{x}")
            }
        }
        HashKey::Str(s) => format!("{s:?}"),
        HashKey::Tuple(items) => {
            let inner: Vec<_> = items.iter().map(hashkey_repr).collect();
            format!("({})", inner.join(", "))
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_repr_string())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                Shared::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Dict(a), Self::Dict(b)) => Shared::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Set(a), Self::Set(b)) => Shared::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Instance(a), Self::Instance(b)) => Shared::ptr_eq(a, b),
            (Self::Class(a), Self::Class(b)) => Shared::ptr_eq(a, b),
            (Self::File(a), Self::File(b)) => Shared::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Shared::ptr_eq(a, b),
            (Self::NativeFunction(a), Self::NativeFunction(b)) => Shared::ptr_eq(a, b),
            (a, b) => match (a.as_numeric_float(), b.as_numeric_float()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}
