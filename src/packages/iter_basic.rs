//! `range()`: eagerly materialized into a `list` rather than a true lazy
//! sequence. A real lazy range type would need its own `Value` variant and
//! iterator protocol; a plain list covers every guest-visible use (`for`,
//! `list()`, indexing) at the cost of allocating the whole range up front.

use crate::engine::Engine;
use crate::fn_native::{NativeImpl, Shared};
use crate::value::Value;
use crate::INT;
use std::cell::RefCell;
use std::rc::Rc;

pub(super) fn register(engine: &Engine) {
    engine.register_native(
        "range",
        NativeImpl::Pure(Rc::new(|ctx, args, _| {
            let (start, stop, step) = match args.as_slice() {
                [stop] => (0, as_int(ctx, stop)?, 1),
                [start, stop] => (as_int(ctx, start)?, as_int(ctx, stop)?, 1),
                [start, stop, step] => (as_int(ctx, start)?, as_int(ctx, stop)?, as_int(ctx, step)?),
                _ => {
                    return Err(ctx.error(format!(
                        "range() expected 1 to 3 arguments, got {}",
                        args.len()
                    )))
                }
            };
            if step == 0 {
                return Err(ctx.error("range() arg 3 must not be zero"));
            }
            let mut out = Vec::new();
            let mut i = start;
            if step > 0 {
                while i < stop {
                    out.push(Value::Int(i));
                    i += step;
                }
            } else {
                while i > stop {
                    out.push(Value::Int(i));
                    i += step;
                }
            }
            Ok(Value::List(Shared::new(RefCell::new(out))))
        })),
    );
}

fn as_int(ctx: &crate::fn_native::NativeCallContext, v: &Value) -> Result<INT, crate::RuntimeError> {
    match v {
        Value::Int(i) => Ok(*i),
        Value::Bool(b) => Ok(*b as INT),
        other => Err(ctx.error(format!(
            "'{}' object cannot be interpreted as an integer",
            other.type_name()
        ))),
    }
}
