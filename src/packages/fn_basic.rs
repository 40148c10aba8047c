//! Core value built-ins: `len`, `str`, `repr`, `int`, `float`, `bool`,
//! `type`. `print` and the file built-ins live in `io_basic`, since they
//! need engine-level resources a plain closure can't capture.

use crate::engine::Engine;
use crate::error::RuntimeError;
use crate::fn_native::{NativeCallContext, NativeImpl};
use crate::value::Value;
use crate::{FLOAT, INT};
use std::rc::Rc;

pub(super) fn register(engine: &Engine) {
    engine.register_native(
        "len",
        NativeImpl::Pure(Rc::new(|ctx, args, _| {
            let v = arg0(ctx, args)?;
            let n = match v {
                Value::Str(s) => s.chars().count(),
                Value::List(l) => l.borrow().len(),
                Value::Tuple(t) => t.len(),
                Value::Set(s) => s.borrow().len(),
                Value::Dict(d) => d.borrow().len(),
                other => {
                    return Err(ctx.error(format!("object of type '{}' has no len()", other.type_name())))
                }
            };
            Ok(Value::Int(n as INT))
        })),
    );

    engine.register_native(
        "str",
        NativeImpl::Pure(Rc::new(|ctx, args, _| {
            Ok(Value::Str(arg0(ctx, args)?.to_display_string().into()))
        })),
    );

    engine.register_native(
        "repr",
        NativeImpl::Pure(Rc::new(|ctx, args, _| {
            Ok(Value::Str(arg0(ctx, args)?.to_repr_string().into()))
        })),
    );

    engine.register_native(
        "int",
        NativeImpl::Pure(Rc::new(|ctx, args, _| {
            let v = arg0(ctx, args)?;
            Ok(Value::Int(match v {
                Value::Int(i) => *i,
                Value::Float(x) => *x as INT,
                Value::Bool(b) => *b as INT,
                Value::Str(s) => s
                    .trim()
                    .parse::<INT>()
                    .map_err(|_| ctx.error(format!("invalid literal for int(): '{s}'")))?,
                other => {
                    return Err(ctx.error(format!("cannot convert '{}' to int", other.type_name())))
                }
            }))
        })),
    );

    engine.register_native(
        "float",
        NativeImpl::Pure(Rc::new(|ctx, args, _| {
            let v = arg0(ctx, args)?;
            Ok(Value::Float(match v {
                Value::Int(i) => *i as FLOAT,
                Value::Float(x) => *x,
                Value::Bool(b) => *b as i64 as FLOAT,
                Value::Str(s) => s
                    .trim()
                    .parse::<FLOAT>()
                    .map_err(|_| ctx.error(format!("invalid literal for float(): '{s}'")))?,
                other => {
                    return Err(ctx.error(format!("cannot convert '{}' to float", other.type_name())))
                }
            }))
        })),
    );

    engine.register_native(
        "bool",
        NativeImpl::Pure(Rc::new(|ctx, args, _| Ok(Value::Bool(arg0(ctx, args)?.is_truthy())))),
    );

    engine.register_native(
        "type",
        NativeImpl::Pure(Rc::new(|ctx, args, _| {
            Ok(Value::Str(arg0(ctx, args)?.type_name().into()))
        })),
    );
}

fn arg0<'a>(ctx: &NativeCallContext, args: &'a [Value]) -> Result<&'a Value, RuntimeError> {
    args.first()
        .ok_or_else(|| ctx.error(format!("'{}' called with too few arguments", ctx.fn_name())))
}
