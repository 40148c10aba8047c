//! The tree-walking evaluator: statement/expression dispatch, resource
//! accounting, and the guest language's operator semantics.

use crate::ast::{BinOp, ClassDef, Expr, Stmt, UnOp};
use crate::class::{self, Class, Method};
use crate::error::RuntimeError;
use crate::fn_native::{NativeFnDef, NativeImpl, Shared, Special};
use crate::scope::Scope;
use crate::token::Position;
use crate::value::{FuncValue, HashKey, Value};
use crate::vfs::Vfs;
use crate::{Identifier, FLOAT, INT};
use indexmap::{IndexMap, IndexSet};
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;

/// Resource limits enforced while a script runs: a fixed call-stack depth, a
/// running operation counter, and size ceilings on strings and collections,
/// all checked unless the crate is built with the `unchecked` feature.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_call_levels: usize,
    pub max_operations: u64,
    pub max_string_size: usize,
    pub max_collection_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_call_levels: 1000,
            max_operations: 10_000_000,
            max_string_size: 16 * 1024 * 1024,
            max_collection_size: 1_000_000,
        }
    }
}

/// The embeddable interpreter. Holds the global environment, the virtual
/// filesystem, the registered resource limits, and the host's print hook.
///
/// A fresh [`Engine`] is pre-seeded with the standard built-ins (see
/// [`crate::packages`]). Multiple [`Self::run`]/[`Self::eval`] calls on the
/// same engine share its global scope and VFS.
pub struct Engine {
    pub(crate) global: Scope,
    pub(crate) vfs: Vfs,
    pub(crate) limits: Limits,
    pub(crate) print_hook: RefCell<Box<dyn FnMut(&str)>>,
    op_count: Cell<u64>,
    call_depth: Cell<usize>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        let engine = Self {
            global: Scope::new(),
            vfs: Vfs::new(),
            limits: Limits::default(),
            print_hook: RefCell::new(Box::new(|s: &str| print!("{s}"))),
            op_count: Cell::new(0),
            call_depth: Cell::new(0),
        };
        crate::packages::register_all(&engine);
        engine
    }

    pub(crate) fn register_native(&self, name: impl Into<Identifier>, imp: NativeImpl) {
        let name = name.into();
        self.global.define(
            name.clone(),
            Value::NativeFunction(Shared::new(NativeFnDef { name, imp, bound_args: Vec::new() })),
        );
    }

    pub(crate) fn register_special(&self, name: impl Into<Identifier>, special: Special) {
        self.register_native(name, NativeImpl::Special(special));
    }

    pub(crate) fn inc_operations(&self, pos: Position) -> Result<(), RuntimeError> {
        let n = self.op_count.get() + 1;
        self.op_count.set(n);
        if !cfg!(feature = "unchecked") && n > self.limits.max_operations {
            return Err(RuntimeError::TooManyOperations(pos));
        }
        Ok(())
    }

    pub(crate) fn enter_call(&self, pos: Position) -> Result<(), RuntimeError> {
        let d = self.call_depth.get() + 1;
        if !cfg!(feature = "unchecked") && d > self.limits.max_call_levels {
            return Err(RuntimeError::RecursionError(pos));
        }
        self.call_depth.set(d);
        Ok(())
    }

    pub(crate) fn exit_call(&self) {
        self.call_depth.set(self.call_depth.get().saturating_sub(1));
    }

    pub(crate) fn check_collection_size(&self, len: usize, pos: Position) -> Result<(), RuntimeError> {
        if !cfg!(feature = "unchecked") && len > self.limits.max_collection_size {
            return Err(RuntimeError::TooManyItems(pos));
        }
        Ok(())
    }

    pub(crate) fn check_string_size(&self, len: usize, pos: Position) -> Result<(), RuntimeError> {
        if !cfg!(feature = "unchecked") && len > self.limits.max_string_size {
            return Err(RuntimeError::StringTooLarge(pos));
        }
        Ok(())
    }

    pub(crate) fn print(&self, s: &str) {
        (self.print_hook.borrow_mut())(s);
    }

    // ---- statements ----

    pub(crate) fn eval_stmts(&self, stmts: &[Stmt], scope: &Scope) -> Result<(), RuntimeError> {
        for stmt in stmts {
            self.eval_stmt(stmt, scope)?;
        }
        Ok(())
    }

    pub(crate) fn eval_stmt(&self, stmt: &Stmt, scope: &Scope) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Expr(e) => {
                self.eval_expr(e, scope)?;
                Ok(())
            }
            Stmt::Assign(targets, value_expr, pos) => {
                let value = self.eval_expr(value_expr, scope)?;
                for target in targets {
                    self.assign_target(target, value.clone(), scope, *pos)?;
                }
                Ok(())
            }
            Stmt::AugAssign(target, op, value_expr, pos) => {
                let current = self.eval_expr(target, scope)?;
                let rhs = self.eval_expr(value_expr, scope)?;
                let new_value = self.apply_binop(*op, current, rhs, *pos)?;
                self.assign_target(target, new_value, scope, *pos)
            }
            Stmt::If(branches, else_body, _) => {
                for (cond, body) in branches {
                    if self.eval_expr(cond, scope)?.is_truthy() {
                        return self.eval_stmts(body, scope);
                    }
                }
                self.eval_stmts(else_body, scope)
            }
            Stmt::While(cond, body, pos) => {
                while self.eval_expr(cond, scope)?.is_truthy() {
                    self.inc_operations(*pos)?;
                    match self.eval_stmts(body, scope) {
                        Ok(()) => {}
                        Err(RuntimeError::LoopBreak(_)) => break,
                        Err(RuntimeError::LoopContinue(_)) => continue,
                        Err(e) => return Err(e),
                    }
                }
                Ok(())
            }
            Stmt::For(var, iter_expr, body, pos) => {
                let iterable = self.eval_expr(iter_expr, scope)?;
                let items = self.iterate(&iterable, *pos)?;
                for item in items {
                    self.inc_operations(*pos)?;
                    scope.define(var.name.clone(), item);
                    match self.eval_stmts(body, scope) {
                        Ok(()) => {}
                        Err(RuntimeError::LoopBreak(_)) => break,
                        Err(RuntimeError::LoopContinue(_)) => continue,
                        Err(e) => return Err(e),
                    }
                }
                Ok(())
            }
            Stmt::Def(def, _) => {
                let func = FuncValue {
                    def: Shared::new(def.clone()),
                    closure: scope.clone(),
                    bound_self: None,
                    defining_class: None,
                };
                scope.define(def.name.name.clone(), Value::Function(Shared::new(func)));
                Ok(())
            }
            Stmt::ClassDef(def, pos) => self.eval_class_def(def, scope, *pos),
            Stmt::Return(value_expr, pos) => {
                let value = match value_expr {
                    Some(e) => self.eval_expr(e, scope)?,
                    None => Value::None,
                };
                Err(RuntimeError::Return(value, *pos))
            }
            Stmt::Pass(_) => Ok(()),
            Stmt::Break(pos) => Err(RuntimeError::LoopBreak(*pos)),
            Stmt::Continue(pos) => Err(RuntimeError::LoopContinue(*pos)),
        }
    }

    fn eval_class_def(&self, def: &ClassDef, scope: &Scope, pos: Position) -> Result<(), RuntimeError> {
        let base = match &def.base {
            Some(id) => match scope.get(&id.name) {
                Some(Value::Class(c)) => Some(c),
                Some(_) => {
                    return Err(RuntimeError::TypeError(
                        format!("'{}' is not a class", id.name),
                        id.pos,
                    ))
                }
                None => return Err(RuntimeError::NameError(id.name.to_string(), id.pos)),
            },
            None => None,
        };
        let mut methods = std::collections::HashMap::new();
        for m in &def.methods {
            methods.insert(
                m.name.name.clone(),
                Method {
                    def: Shared::new(m.clone()),
                    closure: scope.clone(),
                },
            );
        }
        let class = Shared::new(Class {
            name: def.name.name.clone(),
            base,
            methods,
        });
        scope.define(def.name.name.clone(), Value::Class(class));
        let _ = pos;
        Ok(())
    }

    fn assign_target(
        &self,
        target: &Expr,
        value: Value,
        scope: &Scope,
        pos: Position,
    ) -> Result<(), RuntimeError> {
        match target {
            Expr::Variable(id) => {
                if !scope.assign(&id.name, value.clone()) {
                    scope.define(id.name.clone(), value);
                }
                Ok(())
            }
            Expr::Attr(recv, name, _) => {
                let recv_val = self.eval_expr(recv, scope)?;
                match recv_val {
                    Value::Instance(inst) => {
                        inst.set_attr(name.clone(), value);
                        Ok(())
                    }
                    other => Err(RuntimeError::TypeError(
                        format!("'{}' object has no attributes", other.type_name()),
                        pos,
                    )),
                }
            }
            Expr::Index(recv, idx, _) => {
                let recv_val = self.eval_expr(recv, scope)?;
                let idx_val = self.eval_expr(idx, scope)?;
                match recv_val {
                    Value::List(list) => {
                        let mut list = list.borrow_mut();
                        let i = self.resolve_index(&idx_val, list.len(), pos)?;
                        list[i] = value;
                        Ok(())
                    }
                    Value::Dict(dict) => {
                        let key = HashKey::try_from_value(&idx_val, pos)?;
                        let mut dict = dict.borrow_mut();
                        self.check_collection_size(dict.len() + 1, pos)?;
                        dict.insert(key, value);
                        Ok(())
                    }
                    other => Err(RuntimeError::TypeError(
                        format!("'{}' object does not support item assignment", other.type_name()),
                        pos,
                    )),
                }
            }
            _ => unreachable!("invalid assignment targets are rejected at parse time"),
        }
    }

    fn resolve_index(&self, idx: &Value, len: usize, pos: Position) -> Result<usize, RuntimeError> {
        let i = match idx {
            Value::Int(i) => *i,
            other => {
                return Err(RuntimeError::TypeError(
                    format!("indices must be integers, not '{}'", other.type_name()),
                    pos,
                ))
            }
        };
        let i = if i < 0 { i + len as INT } else { i };
        if i < 0 || i as usize >= len {
            return Err(RuntimeError::IndexError("index out of range".to_string(), pos));
        }
        Ok(i as usize)
    }

    /// Expand a value into the sequence a `for` loop / argument spread walks.
    pub(crate) fn iterate(&self, value: &Value, pos: Position) -> Result<Vec<Value>, RuntimeError> {
        Ok(match value {
            Value::List(l) => l.borrow().clone(),
            Value::Tuple(t) => t.as_ref().clone(),
            Value::Str(s) => s.chars().map(|c| Value::Str(c.to_string().into())).collect(),
            Value::Set(s) => s.borrow().iter().map(hashkey_to_value).collect(),
            Value::Dict(d) => d.borrow().keys().map(hashkey_to_value).collect(),
            other => {
                return Err(RuntimeError::TypeError(
                    format!("'{}' object is not iterable", other.type_name()),
                    pos,
                ))
            }
        })
    }

    // ---- expressions ----

    pub(crate) fn eval_expr(&self, expr: &Expr, scope: &Scope) -> Result<Value, RuntimeError> {
        self.inc_operations(expr.position())?;
        match expr {
            Expr::IntLit(i, _) => Ok(Value::Int(*i)),
            Expr::FloatLit(x, _) => Ok(Value::Float(*x)),
            Expr::StrLit(s, _) => Ok(Value::Str(s.as_str().into())),
            Expr::BoolLit(b, _) => Ok(Value::Bool(*b)),
            Expr::NoneLit(_) => Ok(Value::None),
            Expr::Variable(id) => scope
                .get(&id.name)
                .ok_or_else(|| RuntimeError::NameError(id.name.to_string(), id.pos)),
            Expr::ListLit(items, pos) => {
                let values = items
                    .iter()
                    .map(|e| self.eval_expr(e, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                self.check_collection_size(values.len(), *pos)?;
                Ok(Value::List(Shared::new(RefCell::new(values))))
            }
            Expr::TupleLit(items, _) => {
                let values = items
                    .iter()
                    .map(|e| self.eval_expr(e, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Tuple(Shared::new(values)))
            }
            Expr::SetLit(items, pos) => {
                let mut set = IndexSet::new();
                for e in items {
                    let v = self.eval_expr(e, scope)?;
                    set.insert(HashKey::try_from_value(&v, *pos)?);
                }
                self.check_collection_size(set.len(), *pos)?;
                Ok(Value::Set(Shared::new(RefCell::new(set))))
            }
            Expr::DictLit(pairs, pos) => {
                let mut map = IndexMap::new();
                for (k, v) in pairs {
                    let kv = self.eval_expr(k, scope)?;
                    let vv = self.eval_expr(v, scope)?;
                    map.insert(HashKey::try_from_value(&kv, *pos)?, vv);
                }
                self.check_collection_size(map.len(), *pos)?;
                Ok(Value::Dict(Shared::new(RefCell::new(map))))
            }
            Expr::Unary(op, operand, pos) => {
                let v = self.eval_expr(operand, scope)?;
                self.apply_unop(*op, v, *pos)
            }
            Expr::Binary(BinOp::And, lhs, rhs, _) => {
                let l = self.eval_expr(lhs, scope)?;
                if !l.is_truthy() {
                    Ok(l)
                } else {
                    self.eval_expr(rhs, scope)
                }
            }
            Expr::Binary(BinOp::Or, lhs, rhs, _) => {
                let l = self.eval_expr(lhs, scope)?;
                if l.is_truthy() {
                    Ok(l)
                } else {
                    self.eval_expr(rhs, scope)
                }
            }
            Expr::Binary(op, lhs, rhs, pos) => {
                let l = self.eval_expr(lhs, scope)?;
                let r = self.eval_expr(rhs, scope)?;
                self.apply_binop(*op, l, r, *pos)
            }
            Expr::Call(callee, args, pos) => self.eval_call(callee, args, scope, *pos),
            Expr::Attr(recv, name, pos) => self.eval_attr(recv, name, scope, *pos),
            Expr::Index(recv, idx, pos) => {
                let recv_val = self.eval_expr(recv, scope)?;
                let idx_val = self.eval_expr(idx, scope)?;
                self.index_value(&recv_val, &idx_val, *pos)
            }
            Expr::Lambda(params, body, _) => {
                let def = crate::ast::FnDef {
                    name: crate::ast::Ident {
                        name: "<lambda>".into(),
                        pos: expr.position(),
                    },
                    params: params.clone(),
                    body: vec![Stmt::Return(Some((**body).clone()), body.position())],
                };
                Ok(Value::Function(Shared::new(FuncValue {
                    def: Shared::new(def),
                    closure: scope.clone(),
                    bound_self: None,
                    defining_class: None,
                })))
            }
            Expr::Super(pos) => Err(RuntimeError::TypeError(
                "'super' is not a value; it must be followed by '.name'".to_string(),
                *pos,
            )),
        }
    }

    fn eval_attr(&self, recv: &Expr, name: &str, scope: &Scope, pos: Position) -> Result<Value, RuntimeError> {
        if let Expr::Super(_) = recv {
            return self.resolve_super_method(scope, name, pos);
        }
        let recv_val = self.eval_expr(recv, scope)?;
        match recv_val {
            Value::Instance(inst) => {
                if let Some(v) = inst.get_attr(name) {
                    return Ok(v);
                }
                match class::resolve_method(&inst.class, name) {
                    Some((owner, method)) => Ok(Value::Function(Shared::new(FuncValue {
                        def: method.def,
                        closure: method.closure,
                        bound_self: Some(Value::Instance(inst)),
                        defining_class: Some(owner),
                    }))),
                    None => Err(RuntimeError::AttributeError(
                        format!("'{}' object has no attribute '{name}'", inst.class.name),
                        pos,
                    )),
                }
            }
            Value::Class(class) => match class::resolve_method(&class, name) {
                Some((owner, method)) => Ok(Value::Function(Shared::new(FuncValue {
                    def: method.def,
                    closure: method.closure,
                    bound_self: None,
                    defining_class: Some(owner),
                }))),
                None => Err(RuntimeError::AttributeError(
                    format!("class '{}' has no attribute '{name}'", class.name),
                    pos,
                )),
            },
            Value::File(handle) => {
                let special = match name {
                    "read" => Special::Read,
                    "readline" => Special::ReadLine,
                    "write" => Special::Write,
                    "close" => Special::Close,
                    _ => {
                        return Err(RuntimeError::AttributeError(
                            format!("'file' object has no attribute '{name}'"),
                            pos,
                        ))
                    }
                };
                Ok(Value::NativeFunction(Shared::new(NativeFnDef {
                    name: name.into(),
                    imp: NativeImpl::Special(special),
                    bound_args: vec![Value::File(handle)],
                })))
            }
            other => Err(RuntimeError::AttributeError(
                format!("'{}' object has no attribute '{name}'", other.type_name()),
                pos,
            )),
        }
    }

    pub(crate) fn resolve_super_method(&self, scope: &Scope, name: &str, pos: Position) -> Result<Value, RuntimeError> {
        let current_class = match scope.get("__class__") {
            Some(Value::Class(c)) => c,
            _ => {
                return Err(RuntimeError::TypeError(
                    "'super' used outside of a method".to_string(),
                    pos,
                ))
            }
        };
        let base = current_class
            .base
            .clone()
            .ok_or_else(|| RuntimeError::TypeError("class has no base class".to_string(), pos))?;
        let self_val = scope
            .get("__self__")
            .ok_or_else(|| RuntimeError::TypeError("'super' used outside of a method".to_string(), pos))?;
        match class::resolve_method(&base, name) {
            Some((owner, method)) => Ok(Value::Function(Shared::new(FuncValue {
                def: method.def,
                closure: method.closure,
                bound_self: Some(self_val),
                defining_class: Some(owner),
            }))),
            None => Err(RuntimeError::AttributeError(
                format!("'{}' object has no attribute '{name}'", base.name),
                pos,
            )),
        }
    }

    fn index_value(&self, recv: &Value, idx: &Value, pos: Position) -> Result<Value, RuntimeError> {
        match recv {
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let i = self.resolve_index(idx, chars.len(), pos)?;
                Ok(Value::Str(chars[i].to_string().into()))
            }
            Value::List(l) => {
                let l = l.borrow();
                let i = self.resolve_index(idx, l.len(), pos)?;
                Ok(l[i].clone())
            }
            Value::Tuple(t) => {
                let i = self.resolve_index(idx, t.len(), pos)?;
                Ok(t[i].clone())
            }
            Value::Dict(d) => {
                let key = HashKey::try_from_value(idx, pos)?;
                d.borrow()
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| RuntimeError::KeyError(idx.to_repr_string(), pos))
            }
            other => Err(RuntimeError::TypeError(
                format!("'{}' object is not subscriptable", other.type_name()),
                pos,
            )),
        }
    }

    fn apply_unop(&self, op: UnOp, v: Value, pos: Position) -> Result<Value, RuntimeError> {
        match op {
            UnOp::Not => Ok(Value::Bool(!v.is_truthy())),
            UnOp::Neg => match v {
                Value::Int(i) => Ok(Value::Int(i.wrapping_neg())),
                Value::Float(x) => Ok(Value::Float(-x)),
                Value::Bool(b) => Ok(Value::Int(-(b as INT))),
                other => Err(RuntimeError::TypeError(
                    format!("bad operand type for unary -: '{}'", other.type_name()),
                    pos,
                )),
            },
            UnOp::BitNot => match v {
                Value::Int(i) => Ok(Value::Int(!i)),
                Value::Bool(b) => Ok(Value::Int(!(b as INT))),
                other => Err(RuntimeError::TypeError(
                    format!("bad operand type for unary ~: '{}'", other.type_name()),
                    pos,
                )),
            },
        }
    }

    pub(crate) fn apply_binop(&self, op: BinOp, l: Value, r: Value, pos: Position) -> Result<Value, RuntimeError> {
        use BinOp::*;
        match op {
            Eq => return Ok(Value::Bool(l == r)),
            Ne => return Ok(Value::Bool(l != r)),
            Lt | Le | Gt | Ge => {
                let ord = self.compare_values(&l, &r, pos)?;
                return Ok(Value::Bool(match op {
                    Lt => ord == Ordering::Less,
                    Le => ord != Ordering::Greater,
                    Gt => ord == Ordering::Greater,
                    Ge => ord != Ordering::Less,
                    _ => unreachable!(),
                }));
            }
            In => return self.membership(&l, &r, pos),
            And | Or => unreachable!("short-circuited before apply_binop"),
            _ => {}
        }

        match op {
            Add => self.add(l, r, pos),
            Sub => self.numeric_op(l, r, pos, |a, b| a.wrapping_sub(b), |a, b| a - b, "-"),
            Mul => self.mul(l, r, pos),
            Div => {
                let (a, b) = self.as_floats(&l, &r, pos, "/")?;
                if b == 0.0 {
                    return Err(RuntimeError::ZeroDivisionError(pos));
                }
                Ok(Value::Float(a / b))
            }
            FloorDiv => self.floor_div(l, r, pos),
            Mod => self.modulo(l, r, pos),
            Pow => self.pow(l, r, pos),
            _ => unreachable!(),
        }
    }

    fn compare_values(&self, l: &Value, r: &Value, pos: Position) -> Result<Ordering, RuntimeError> {
        match (l, r) {
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Ok(a.as_str().cmp(b.as_str())),
            (Value::List(a), Value::List(b)) => self.compare_seq(&a.borrow(), &b.borrow(), pos),
            (Value::Tuple(a), Value::Tuple(b)) => self.compare_seq(a, b, pos),
            _ => match (l.as_numeric_float(), r.as_numeric_float()) {
                (Some(a), Some(b)) => {
                    a.partial_cmp(&b).ok_or_else(|| cross_kind_error(l, r, pos))
                }
                _ => Err(cross_kind_error(l, r, pos)),
            },
        }
    }

    fn compare_seq(&self, a: &[Value], b: &[Value], pos: Position) -> Result<Ordering, RuntimeError> {
        for (x, y) in a.iter().zip(b.iter()) {
            let ord = self.compare_values(x, y, pos)?;
            if ord != Ordering::Equal {
                return Ok(ord);
            }
        }
        Ok(a.len().cmp(&b.len()))
    }

    fn membership(&self, needle: &Value, haystack: &Value, pos: Position) -> Result<Value, RuntimeError> {
        Ok(Value::Bool(match haystack {
            Value::Str(s) => match needle {
                Value::Str(n) => s.contains(n.as_str()),
                other => {
                    return Err(RuntimeError::TypeError(
                        format!("'in <str>' requires str, not '{}'", other.type_name()),
                        pos,
                    ))
                }
            },
            Value::List(l) => l.borrow().iter().any(|v| v == needle),
            Value::Tuple(t) => t.iter().any(|v| v == needle),
            Value::Set(s) => {
                let key = HashKey::try_from_value(needle, pos)?;
                s.borrow().contains(&key)
            }
            Value::Dict(d) => {
                let key = HashKey::try_from_value(needle, pos)?;
                d.borrow().contains_key(&key)
            }
            other => {
                return Err(RuntimeError::TypeError(
                    format!("argument of type '{}' is not iterable", other.type_name()),
                    pos,
                ))
            }
        }))
    }

    fn as_floats(&self, l: &Value, r: &Value, pos: Position, op: &str) -> Result<(FLOAT, FLOAT), RuntimeError> {
        match (l.as_numeric_float(), r.as_numeric_float()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(RuntimeError::TypeError(
                format!(
                    "unsupported operand type(s) for {op}: '{}' and '{}'",
                    l.type_name(),
                    r.type_name()
                ),
                pos,
            )),
        }
    }

    fn numeric_op(
        &self,
        l: Value,
        r: Value,
        pos: Position,
        int_op: impl Fn(INT, INT) -> INT,
        float_op: impl Fn(FLOAT, FLOAT) -> FLOAT,
        name: &str,
    ) -> Result<Value, RuntimeError> {
        match (&l, &r) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(int_op(*a, *b))),
            _ => {
                let (a, b) = self.as_floats(&l, &r, pos, name)?;
                Ok(Value::Float(float_op(a, b)))
            }
        }
    }

    fn add(&self, l: Value, r: Value, pos: Position) -> Result<Value, RuntimeError> {
        match (&l, &r) {
            (Value::Str(a), Value::Str(b)) => {
                let combined = format!("{a}{b}");
                self.check_string_size(combined.len(), pos)?;
                Ok(Value::Str(combined.into()))
            }
            (Value::List(a), Value::List(b)) => {
                let mut v = a.borrow().clone();
                v.extend(b.borrow().iter().cloned());
                self.check_collection_size(v.len(), pos)?;
                Ok(Value::List(Shared::new(RefCell::new(v))))
            }
            (Value::Tuple(a), Value::Tuple(b)) => {
                let mut v = a.as_ref().clone();
                v.extend(b.iter().cloned());
                Ok(Value::Tuple(Shared::new(v)))
            }
            (Value::Int(_) | Value::Float(_) | Value::Bool(_), Value::Int(_) | Value::Float(_) | Value::Bool(_)) => {
                self.numeric_op(l, r, pos, |a, b| a.wrapping_add(b), |a, b| a + b, "+")
            }
            _ => Err(RuntimeError::TypeError(
                format!(
                    "unsupported operand type(s) for +: '{}' and '{}'",
                    l.type_name(),
                    r.type_name()
                ),
                pos,
            )),
        }
    }

    fn mul(&self, l: Value, r: Value, pos: Position) -> Result<Value, RuntimeError> {
        match (&l, &r) {
            (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
                let out = if *n > 0 { s.repeat(*n as usize) } else { String::new() };
                self.check_string_size(out.len(), pos)?;
                Ok(Value::Str(out.into()))
            }
            (Value::List(l), Value::Int(n)) | (Value::Int(n), Value::List(l)) => {
                let item = l.borrow();
                let mut out = Vec::new();
                if *n > 0 {
                    for _ in 0..*n {
                        out.extend(item.iter().cloned());
                    }
                }
                self.check_collection_size(out.len(), pos)?;
                Ok(Value::List(Shared::new(RefCell::new(out))))
            }
            (Value::Tuple(t), Value::Int(n)) | (Value::Int(n), Value::Tuple(t)) => {
                let mut out = Vec::new();
                if *n > 0 {
                    for _ in 0..*n {
                        out.extend(t.iter().cloned());
                    }
                }
                Ok(Value::Tuple(Shared::new(out)))
            }
            (Value::Int(_) | Value::Float(_) | Value::Bool(_), Value::Int(_) | Value::Float(_) | Value::Bool(_)) => {
                self.numeric_op(l, r, pos, |a, b| a.wrapping_mul(b), |a, b| a * b, "*")
            }
            _ => Err(RuntimeError::TypeError(
                format!(
                    "unsupported operand type(s) for *: '{}' and '{}'",
                    l.type_name(),
                    r.type_name()
                ),
                pos,
            )),
        }
    }

    fn floor_div(&self, l: Value, r: Value, pos: Position) -> Result<Value, RuntimeError> {
        if let (Value::Int(a), Value::Int(b)) = (&l, &r) {
            if *b == 0 {
                return Err(RuntimeError::ZeroDivisionError(pos));
            }
            return Ok(Value::Int(int_floor_div(*a, *b)));
        }
        let (a, b) = self.as_floats(&l, &r, pos, "//")?;
        if b == 0.0 {
            return Err(RuntimeError::ZeroDivisionError(pos));
        }
        Ok(Value::Float((a / b).floor()))
    }

    fn modulo(&self, l: Value, r: Value, pos: Position) -> Result<Value, RuntimeError> {
        if let (Value::Int(a), Value::Int(b)) = (&l, &r) {
            if *b == 0 {
                return Err(RuntimeError::ZeroDivisionError(pos));
            }
            return Ok(Value::Int(int_modulo(*a, *b)));
        }
        let (a, b) = self.as_floats(&l, &r, pos, "%")?;
        if b == 0.0 {
            return Err(RuntimeError::ZeroDivisionError(pos));
        }
        Ok(Value::Float(a - (a / b).floor() * b))
    }

    fn pow(&self, l: Value, r: Value, pos: Position) -> Result<Value, RuntimeError> {
        if let (Value::Int(a), Value::Int(b)) = (&l, &r) {
            if *b >= 0 {
                return Ok(Value::Int(int_pow(*a, *b)));
            }
        }
        let (a, b) = self.as_floats(&l, &r, pos, "**")?;
        Ok(Value::Float(a.powf(b)))
    }
}

fn cross_kind_error(l: &Value, r: &Value, pos: Position) -> RuntimeError {
    RuntimeError::TypeError(
        format!(
            "'<' not supported between instances of '{}' and '{}'",
            l.type_name(),
            r.type_name()
        ),
        pos,
    )
}

pub(crate) fn hashkey_to_value(key: &HashKey) -> Value {
    match key {
        HashKey::None => Value::None,
        HashKey::Num(bits) => {
            let x = FLOAT::from_bits(*bits);
            if x == x.trunc() && x.is_finite() {
                Value::Int(x as INT)
            } else {
                Value::Float(x)
            }
        }
        HashKey::Str(s) => Value::Str(s.clone()),
        HashKey::Tuple(items) => Value::Tuple(Shared::new(items.iter().map(hashkey_to_value).collect())),
    }
}

fn int_floor_div(a: INT, b: INT) -> INT {
    let q = a.wrapping_div(b);
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

fn int_modulo(a: INT, b: INT) -> INT {
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        r + b
    } else {
        r
    }
}

fn int_pow(base: INT, exp: INT) -> INT {
    let mut result: INT = 1;
    let mut b = base;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = result.wrapping_mul(b);
        }
        b = b.wrapping_mul(b);
        e >>= 1;
    }
    result
}
