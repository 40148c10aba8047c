//! Runtime error type.
//!
//! Non-local control flow (`return`, `break`, `continue`) is folded into the
//! same enum as genuine errors so that statement evaluation can share one
//! `Result` type throughout the interpreter, and unwind via `?` all the way
//! up to the loop or function call that actually handles it.

use crate::token::Position;
use crate::Value;
use std::fmt;

/// Either a guest-visible error or a non-local jump in progress.
#[derive(Debug, Clone)]
pub enum RuntimeError {
    /// Name lookup failed.
    NameError(String, Position),
    /// An operation was applied to a value of the wrong type.
    TypeError(String, Position),
    /// A value was semantically invalid for the operation (e.g. `int("x")`).
    ValueError(String, Position),
    /// Sequence/mapping index out of range or of the wrong type.
    IndexError(String, Position),
    /// Dict/Set key not found.
    KeyError(String, Position),
    /// Attribute lookup on an instance/class failed.
    AttributeError(String, Position),
    /// Division or modulo by zero.
    ZeroDivisionError(Position),
    /// Wrong number or combination of arguments passed to a call.
    ArityError(String, Position),
    /// Call-stack depth exceeded [`crate::Limits::max_call_levels`].
    RecursionError(Position),
    /// A value used as a `Set`/`Dict` key is not hashable.
    HashError(String, Position),
    /// Operation counter exceeded [`crate::Limits::max_operations`].
    TooManyOperations(Position),
    /// A collection grew past [`crate::Limits::max_collection_size`].
    TooManyItems(Position),
    /// A string grew past [`crate::Limits::max_string_size`].
    StringTooLarge(Position),
    /// An error that originated inside a registered native Rust function.
    NativeError(String, Position),

    /// Not an error: a `return` statement unwinding to its enclosing call.
    Return(Value, Position),
    /// Not an error: a `break` statement unwinding to its enclosing loop.
    LoopBreak(Position),
    /// Not an error: a `continue` statement unwinding to its enclosing loop.
    LoopContinue(Position),
}

impl RuntimeError {
    /// True for `Return`/`LoopBreak`/`LoopContinue` — non-error control flow
    /// that a caller is expected to intercept rather than report.
    #[must_use]
    pub fn is_control_flow(&self) -> bool {
        matches!(self, Self::Return(..) | Self::LoopBreak(_) | Self::LoopContinue(_))
    }

    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::NameError(_, p)
            | Self::TypeError(_, p)
            | Self::ValueError(_, p)
            | Self::IndexError(_, p)
            | Self::KeyError(_, p)
            | Self::AttributeError(_, p)
            | Self::ZeroDivisionError(p)
            | Self::ArityError(_, p)
            | Self::RecursionError(p)
            | Self::HashError(_, p)
            | Self::TooManyOperations(p)
            | Self::TooManyItems(p)
            | Self::StringTooLarge(p)
            | Self::NativeError(_, p)
            | Self::Return(_, p)
            | Self::LoopBreak(p)
            | Self::LoopContinue(p) => *p,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameError(name, pos) => write!(f, "name '{name}' is not defined ({pos})"),
            Self::TypeError(msg, pos) => write!(f, "type error: {msg} ({pos})"),
            Self::ValueError(msg, pos) => write!(f, "value error: {msg} ({pos})"),
            Self::IndexError(msg, pos) => write!(f, "index error: {msg} ({pos})"),
            Self::KeyError(msg, pos) => write!(f, "key error: {msg} ({pos})"),
            Self::AttributeError(msg, pos) => write!(f, "attribute error: {msg} ({pos})"),
            Self::ZeroDivisionError(pos) => write!(f, "division by zero ({pos})"),
            Self::ArityError(msg, pos) => write!(f, "{msg} ({pos})"),
            Self::RecursionError(pos) => write!(f, "maximum call depth exceeded ({pos})"),
            Self::HashError(msg, pos) => write!(f, "unhashable type: {msg} ({pos})"),
            Self::TooManyOperations(pos) => write!(f, "script exceeded the operation limit ({pos})"),
            Self::TooManyItems(pos) => write!(f, "collection exceeded the size limit ({pos})"),
            Self::StringTooLarge(pos) => write!(f, "string exceeded the size limit ({pos})"),
            Self::NativeError(msg, pos) => write!(f, "{msg} ({pos})"),
            Self::Return(..) => write!(f, "'return' outside a function"),
            Self::LoopBreak(_) => write!(f, "'break' outside a loop"),
            Self::LoopContinue(_) => write!(f, "'continue' outside a loop"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<crate::error_parsing::ParseError> for RuntimeError {
    fn from(err: crate::error_parsing::ParseError) -> Self {
        let pos = err.position();
        Self::ValueError(err.to_string(), pos)
    }
}
