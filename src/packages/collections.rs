//! Container constructors: `list`, `tuple`, `set`, `dict`.

use crate::engine::Engine;
use crate::fn_native::{NativeImpl, Shared};
use crate::value::{HashKey, Value};
use indexmap::{IndexMap, IndexSet};
use std::cell::RefCell;
use std::rc::Rc;

pub(super) fn register(engine: &Engine) {
    engine.register_native(
        "list",
        NativeImpl::Pure(Rc::new(|ctx, args, _| {
            let items = match args.first() {
                Some(v) => engine_iterate(ctx, v)?,
                None => Vec::new(),
            };
            Ok(Value::List(Shared::new(RefCell::new(items))))
        })),
    );

    engine.register_native(
        "tuple",
        NativeImpl::Pure(Rc::new(|ctx, args, _| {
            let items = match args.first() {
                Some(v) => engine_iterate(ctx, v)?,
                None => Vec::new(),
            };
            Ok(Value::Tuple(Shared::new(items)))
        })),
    );

    engine.register_native(
        "set",
        NativeImpl::Pure(Rc::new(|ctx, args, _| {
            let items = match args.first() {
                Some(v) => engine_iterate(ctx, v)?,
                None => Vec::new(),
            };
            let mut set = IndexSet::new();
            for v in items {
                set.insert(HashKey::try_from_value(&v, ctx.position())?);
            }
            Ok(Value::Set(Shared::new(RefCell::new(set))))
        })),
    );

    engine.register_native(
        "dict",
        NativeImpl::Pure(Rc::new(|ctx, args, _| {
            let mut map = IndexMap::new();
            if let Some(v) = args.first() {
                for pair in engine_iterate(ctx, v)? {
                    match pair {
                        Value::Tuple(t) if t.len() == 2 => {
                            let key = HashKey::try_from_value(&t[0], ctx.position())?;
                            map.insert(key, t[1].clone());
                        }
                        Value::List(l) if l.borrow().len() == 2 => {
                            let l = l.borrow();
                            let key = HashKey::try_from_value(&l[0], ctx.position())?;
                            map.insert(key, l[1].clone());
                        }
                        other => {
                            return Err(ctx.error(format!(
                                "cannot convert dictionary update element '{}' to a 2-item sequence",
                                other.type_name()
                            )))
                        }
                    }
                }
            }
            Ok(Value::Dict(Shared::new(RefCell::new(map))))
        })),
    );
}

/// `NativeImpl::Pure` closures have no engine handle, so container
/// conversion re-implements the same walk as `Engine::iterate` for the
/// handful of built-in iterable types rather than reaching back into the
/// engine.
fn engine_iterate(
    ctx: &crate::fn_native::NativeCallContext,
    value: &Value,
) -> Result<Vec<Value>, crate::RuntimeError> {
    Ok(match value {
        Value::List(l) => l.borrow().clone(),
        Value::Tuple(t) => t.as_ref().clone(),
        Value::Str(s) => s.chars().map(|c| Value::Str(c.to_string().into())).collect(),
        Value::Set(s) => s
            .borrow()
            .iter()
            .map(crate::engine::hashkey_to_value)
            .collect(),
        Value::Dict(d) => d
            .borrow()
            .keys()
            .map(crate::engine::hashkey_to_value)
            .collect(),
        other => {
            return Err(ctx.error(format!("'{}' object is not iterable", other.type_name())))
        }
    })
}
