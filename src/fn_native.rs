//! Native (Rust-side) function registration and calling convention.

use crate::token::Position;
use crate::{Identifier, RuntimeError, Value};
use std::rc::Rc;

/// Shared, reference-counted, interior-mutable container used throughout the
/// value model for the guest's mutable container types (`list`, `dict`,
/// `set`, class instances, open files).
///
/// Aliased to [`Rc`] rather than used directly so that a future thread-safe
/// build could swap in [`std::sync::Arc`] without touching call sites.
pub type Shared<T> = Rc<T>;

/// Clone-on-write accessor for a [`Shared`] value: if `value` is the sole
/// owner, returns a direct mutable reference; otherwise clones the inner
/// value first so the mutation doesn't alias other holders.
#[inline]
pub(crate) fn shared_make_mut<T: Clone>(value: &mut Shared<T>) -> &mut T {
    Rc::make_mut(value)
}

/// Unwrap a [`Shared`] value, cloning the inner value if other references
/// still exist.
#[inline]
pub(crate) fn shared_take<T: Clone>(value: Shared<T>) -> T {
    Rc::try_unwrap(value).unwrap_or_else(|rc| (*rc).clone())
}

/// Context handed to a native function at call time: its call-site position
/// and a handle back to the engine's print/diagnostic hook.
pub struct NativeCallContext<'a> {
    pub(crate) fn_name: &'a str,
    pub(crate) pos: Position,
}

impl<'a> NativeCallContext<'a> {
    pub(crate) fn new(fn_name: &'a str, pos: Position) -> Self {
        Self { fn_name, pos }
    }

    /// The name the guest script called this function by.
    #[must_use]
    pub fn fn_name(&self) -> &str {
        self.fn_name
    }

    /// The call-site position, for building a [`RuntimeError`].
    #[must_use]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Build a [`RuntimeError::NativeError`] at the call-site position, the
    /// idiomatic way for a registered function to reject its arguments.
    #[must_use]
    pub fn error(&self, msg: impl Into<String>) -> RuntimeError {
        RuntimeError::NativeError(msg.into(), self.pos)
    }
}

/// The signature every registered native function is adapted to.
///
/// Receives both the positional and (unconsumed) keyword arguments so that
/// built-ins like `print(*args, sep=' ', end='\n')` can accept keyword
/// arguments; functions registered through [`IntoNativeFunction`] simply
/// reject a non-empty keyword map.
pub type NativeFunction = Rc<
    dyn Fn(&NativeCallContext, &mut Vec<Value>, &mut Vec<(Identifier, Value)>) -> Result<Value, RuntimeError>,
>;

/// Converts a native Rust closure into a [`NativeFunction`], adapting
/// ordinary Rust argument types the way [`crate::Engine::register_fn`]
/// exposes to callers.
pub trait IntoNativeFunction<Args> {
    fn into_native(self) -> NativeFunction;
}

/// A type a [`Value`] can be coerced into when binding a native function
/// argument, or coerced from when returning one.
pub trait NativeMarshal: Sized {
    fn from_value(value: &Value, ctx: &NativeCallContext) -> Result<Self, RuntimeError>;
    fn into_value(self) -> Value;
}

impl NativeMarshal for crate::INT {
    fn from_value(value: &Value, ctx: &NativeCallContext) -> Result<Self, RuntimeError> {
        match value {
            Value::Int(i) => Ok(*i),
            _ => Err(ctx.error(format!("expected int, found {}", value.type_name()))),
        }
    }
    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl NativeMarshal for crate::FLOAT {
    fn from_value(value: &Value, ctx: &NativeCallContext) -> Result<Self, RuntimeError> {
        match value {
            Value::Float(x) => Ok(*x),
            Value::Int(i) => Ok(*i as Self),
            _ => Err(ctx.error(format!("expected float, found {}", value.type_name()))),
        }
    }
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl NativeMarshal for bool {
    fn from_value(value: &Value, ctx: &NativeCallContext) -> Result<Self, RuntimeError> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(ctx.error(format!("expected bool, found {}", value.type_name()))),
        }
    }
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl NativeMarshal for String {
    fn from_value(value: &Value, ctx: &NativeCallContext) -> Result<Self, RuntimeError> {
        match value {
            Value::Str(s) => Ok(s.to_string()),
            _ => Err(ctx.error(format!("expected str, found {}", value.type_name()))),
        }
    }
    fn into_value(self) -> Value {
        Value::Str(self.into())
    }
}

impl NativeMarshal for Value {
    fn from_value(value: &Value, _ctx: &NativeCallContext) -> Result<Self, RuntimeError> {
        Ok(value.clone())
    }
    fn into_value(self) -> Value {
        self
    }
}

impl NativeMarshal for () {
    fn from_value(_value: &Value, _ctx: &NativeCallContext) -> Result<Self, RuntimeError> {
        Ok(())
    }
    fn into_value(self) -> Value {
        Value::None
    }
}

macro_rules! impl_into_native {
    ($($arg:ident),*) => {
        #[allow(non_snake_case, unused_variables, unused_mut)]
        impl<F, R, $($arg,)*> IntoNativeFunction<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> R + 'static,
            R: NativeMarshal,
            $($arg: NativeMarshal,)*
        {
            fn into_native(self) -> NativeFunction {
                Rc::new(move |ctx: &NativeCallContext, args: &mut Vec<Value>, kwargs: &mut Vec<(Identifier, Value)>| {
                    if !kwargs.is_empty() {
                        return Err(RuntimeError::ArityError(
                            format!("'{}' does not accept keyword arguments", ctx.fn_name()),
                            ctx.position(),
                        ));
                    }
                    let mut iter = args.iter();
                    $(
                        let $arg = {
                            let v = iter.next().ok_or_else(|| {
                                RuntimeError::ArityError(
                                    format!("'{}' called with too few arguments", ctx.fn_name()),
                                    ctx.position(),
                                )
                            })?;
                            $arg::from_value(v, ctx)?
                        };
                    )*
                    Ok((self)($($arg),*).into_value())
                })
            }
        }
    };
}

impl_into_native!();
impl_into_native!(A);
impl_into_native!(A, B);
impl_into_native!(A, B, C);
impl_into_native!(A, B, C, D);

/// A handful of built-ins need engine-level resources (the print hook, the
/// VFS, host stdin) that a plain [`NativeFunction`] closure can't reach
/// without capturing the engine by reference, which a `'static` closure
/// can't do. These are dispatched specially by [`crate::Engine::call_value`]
/// instead of going through [`NativeImpl::Pure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Special {
    Print,
    Open,
    Read,
    ReadLine,
    Write,
    Close,
    Input,
}

/// Either an ordinary native closure, or one of the engine-resource-backed
/// [`Special`] built-ins.
pub enum NativeImpl {
    Pure(NativeFunction),
    Special(Special),
}

/// A guest-visible name bound to a native function, stored in the same
/// namespace as guest-defined functions.
pub struct NativeFnDef {
    pub name: Identifier,
    pub imp: NativeImpl,
    /// Arguments implicitly prepended at call time, the native-function
    /// analogue of [`crate::value::FuncValue::bound_self`]. Used to bind a
    /// `file` attribute access (`f.read`) into a callable that already
    /// carries its receiver.
    pub bound_args: Vec<Value>,
}
