//! Call-site argument binding and dispatch.
//!
//! Implements the function call protocol from the component design: class
//! instantiation via `__init__`, bound-method receiver prepending, and the
//! positional/keyword/`*args`/`**kwargs` binding algorithm, with default
//! expressions evaluated at call time in the function's defining scope.

use crate::ast::{Arg, Expr, Param};
use crate::class::{self, Instance};
use crate::engine::Engine;
use crate::error::RuntimeError;
use crate::fn_native::{NativeCallContext, NativeImpl, Shared};
use crate::scope::Scope;
use crate::token::Position;
use crate::value::{FuncValue, HashKey, Value};
use crate::Identifier;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashSet;

impl Engine {
    pub(crate) fn eval_call(
        &self,
        callee: &Expr,
        args: &[Arg],
        scope: &Scope,
        pos: Position,
    ) -> Result<Value, RuntimeError> {
        if let Expr::Attr(recv, name, _) = callee {
            if let Expr::Super(_) = **recv {
                let func = self.resolve_super_method(scope, name, pos)?;
                let (pos_args, kw_args) = self.eval_args(args, scope)?;
                return self.call_value(func, pos_args, kw_args, pos);
            }
        }
        let callee_val = self.eval_expr(callee, scope)?;
        let (pos_args, kw_args) = self.eval_args(args, scope)?;
        self.call_value(callee_val, pos_args, kw_args, pos)
    }

    fn eval_args(
        &self,
        args: &[Arg],
        scope: &Scope,
    ) -> Result<(Vec<Value>, Vec<(Identifier, Value)>), RuntimeError> {
        let mut pos_args = Vec::new();
        let mut kw_args = Vec::new();
        for arg in args {
            match arg {
                Arg::Positional(e) => pos_args.push(self.eval_expr(e, scope)?),
                Arg::Keyword(name, e) => kw_args.push((name.clone(), self.eval_expr(e, scope)?)),
                Arg::Spread(e) => {
                    let pos = e.position();
                    let v = self.eval_expr(e, scope)?;
                    pos_args.extend(self.iterate(&v, pos)?);
                }
                Arg::DoubleSpread(e) => {
                    let pos = e.position();
                    let v = self.eval_expr(e, scope)?;
                    match v {
                        Value::Dict(d) => {
                            for (k, val) in d.borrow().iter() {
                                match k {
                                    HashKey::Str(s) => kw_args.push((s.as_str().into(), val.clone())),
                                    _ => {
                                        return Err(RuntimeError::TypeError(
                                            "keyword argument names must be strings".to_string(),
                                            pos,
                                        ))
                                    }
                                }
                            }
                        }
                        other => {
                            return Err(RuntimeError::TypeError(
                                format!("argument after ** must be a dict, not '{}'", other.type_name()),
                                pos,
                            ))
                        }
                    }
                }
            }
        }
        Ok((pos_args, kw_args))
    }

    /// Dispatch a call on an already-evaluated callee value.
    pub(crate) fn call_value(
        &self,
        callee: Value,
        pos_args: Vec<Value>,
        kw_args: Vec<(Identifier, Value)>,
        pos: Position,
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::Class(class) => {
                let instance = Shared::new(Instance::new(class.clone()));
                if let Some((owner, method)) = class::resolve_method(&class, "__init__") {
                    let func = FuncValue {
                        def: method.def,
                        closure: method.closure,
                        bound_self: Some(Value::Instance(instance.clone())),
                        defining_class: Some(owner),
                    };
                    self.call_function(&func, pos_args, kw_args, pos)?;
                }
                Ok(Value::Instance(instance))
            }
            Value::Function(f) => self.call_function(&f, pos_args, kw_args, pos),
            Value::NativeFunction(nf) => {
                let mut args = nf.bound_args.clone();
                args.extend(pos_args);
                let mut kwargs = kw_args;
                match &nf.imp {
                    NativeImpl::Pure(f) => {
                        let ctx = NativeCallContext::new(&nf.name, pos);
                        f(&ctx, &mut args, &mut kwargs)
                    }
                    NativeImpl::Special(special) => {
                        self.call_special(*special, &nf.name, &mut args, &mut kwargs, pos)
                    }
                }
            }
            other => Err(RuntimeError::TypeError(
                format!("'{}' object is not callable", other.type_name()),
                pos,
            )),
        }
    }

    pub(crate) fn call_function(
        &self,
        func: &FuncValue,
        mut pos_args: Vec<Value>,
        mut kw_args: Vec<(Identifier, Value)>,
        pos: Position,
    ) -> Result<Value, RuntimeError> {
        self.enter_call(pos)?;
        let result = (|| {
            if let Some(self_val) = &func.bound_self {
                pos_args.insert(0, self_val.clone());
            }
            let call_scope = func.closure.child();
            self.bind_params(&func.def.params, &func.closure, &mut pos_args, &mut kw_args, &call_scope, pos)?;
            if let Some(self_val) = &func.bound_self {
                call_scope.define("__self__", self_val.clone());
            }
            if let Some(c) = &func.defining_class {
                call_scope.define("__class__", Value::Class(c.clone()));
            }
            match self.eval_stmts(&func.def.body, &call_scope) {
                Ok(()) => Ok(Value::None),
                Err(RuntimeError::Return(v, _)) => Ok(v),
                Err(e) => Err(e),
            }
        })();
        self.exit_call();
        result
    }

    #[allow(clippy::too_many_arguments)]
    fn bind_params(
        &self,
        params: &[Param],
        defining_scope: &Scope,
        pos_args: &mut Vec<Value>,
        kw_args: &mut Vec<(Identifier, Value)>,
        call_scope: &Scope,
        pos: Position,
    ) -> Result<(), RuntimeError> {
        let mut used_names = HashSet::new();
        let mut pi = 0usize;
        let mut has_star = false;

        for param in params {
            used_names.insert(param.ident().name.clone());
            match param {
                Param::Required(id) => {
                    let value = Self::take_positional(pos_args, &mut pi)
                        .or_else(|| Self::take_keyword(kw_args, &id.name))
                        .ok_or_else(|| {
                            RuntimeError::ArityError(
                                format!("missing required argument: '{}'", id.name),
                                pos,
                            )
                        })?;
                    call_scope.define(id.name.clone(), value);
                }
                Param::Optional(id, default_expr) => {
                    let value = match Self::take_positional(pos_args, &mut pi)
                        .or_else(|| Self::take_keyword(kw_args, &id.name))
                    {
                        Some(v) => v,
                        None => self.eval_expr(default_expr, defining_scope)?,
                    };
                    call_scope.define(id.name.clone(), value);
                }
                Param::Star(id) => {
                    has_star = true;
                    let rest: Vec<Value> = pos_args.drain(pi..).collect();
                    call_scope.define(id.name.clone(), Value::Tuple(Shared::new(rest)));
                }
                Param::DoubleStar(id) => {
                    let map: IndexMap<HashKey, Value> = kw_args
                        .drain(..)
                        .map(|(k, v)| (HashKey::Str(k.as_str().into()), v))
                        .collect();
                    call_scope.define(id.name.clone(), Value::Dict(Shared::new(RefCell::new(map))));
                }
            }
        }

        if !has_star && pi < pos_args.len() {
            return Err(RuntimeError::ArityError(
                format!(
                    "too many positional arguments: expected at most {}, got {}",
                    pi,
                    pos_args.len()
                ),
                pos,
            ));
        }
        if let Some((name, _)) = kw_args.first() {
            return Err(RuntimeError::ArityError(
                format!("unexpected keyword argument: '{name}'"),
                pos,
            ));
        }
        Ok(())
    }

    fn take_positional(pos_args: &mut Vec<Value>, pi: &mut usize) -> Option<Value> {
        if *pi < pos_args.len() {
            let v = pos_args[*pi].clone();
            *pi += 1;
            Some(v)
        } else {
            None
        }
    }

    fn take_keyword(kw_args: &mut Vec<(Identifier, Value)>, name: &Identifier) -> Option<Value> {
        let idx = kw_args.iter().position(|(n, _)| n == name)?;
        Some(kw_args.remove(idx).1)
    }
}
