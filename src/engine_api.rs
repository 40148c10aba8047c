//! Public embedding surface: compiling, running, registering native
//! functions, and observing guest `print` output.

use crate::ast::AST;
use crate::engine::Engine;
use crate::error::RuntimeError;
use crate::error_parsing::ParseError;
use crate::fn_native::{IntoNativeFunction, NativeImpl};
use crate::parse::Parser;
use crate::scope::Scope;
use crate::{Identifier, Value};

/// Context available to a callback registered via [`Engine::on_print`] or
/// run through [`Engine::eval_with_scope`]; currently just a marker type
/// reserved for future expansion.
pub struct EvalContext<'a> {
    scope: &'a Scope,
}

impl<'a> EvalContext<'a> {
    pub(crate) fn new(scope: &'a Scope) -> Self {
        Self { scope }
    }

    /// Look up a variable in the scope the expression is executing under.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.scope.get(name)
    }
}

impl Engine {
    /// Parse `source` into a reusable [`AST`] without executing it.
    pub fn compile(&self, source: &str) -> Result<AST, ParseError> {
        Parser::parse(source)
    }

    /// Run a script's statements against the engine's global scope. Pure
    /// side-effecting: does not report the value of the final expression.
    pub fn run(&self, source: &str) -> Result<(), RuntimeError> {
        let ast = self.compile(source)?;
        self.run_ast(&ast)
    }

    /// Run a previously-[`Self::compile`]d program.
    pub fn run_ast(&self, ast: &AST) -> Result<(), RuntimeError> {
        self.eval_stmts(ast.statements(), &self.global)
    }

    /// Evaluate `source` and return the value of its last statement, if that
    /// statement was a bare expression (otherwise `None`).
    pub fn eval(&self, source: &str) -> Result<Value, RuntimeError> {
        let ast = self.compile(source)?;
        self.eval_ast(&ast)
    }

    /// Evaluate a previously-[`Self::compile`]d program, returning the value
    /// of its last statement if that statement was a bare expression.
    pub fn eval_ast(&self, ast: &AST) -> Result<Value, RuntimeError> {
        let stmts = ast.statements();
        let Some((last, rest)) = stmts.split_last() else {
            return Ok(Value::None);
        };
        self.eval_stmts(rest, &self.global)?;
        match last {
            crate::ast::Stmt::Expr(e) => self.eval_expr(e, &self.global),
            other => {
                self.eval_stmt(other, &self.global)?;
                Ok(Value::None)
            }
        }
    }

    /// Register a native Rust function, callable from guest scripts by
    /// `name`. Registering over an existing name overwrites it, including
    /// over a built-in.
    pub fn register_fn<Args>(&mut self, name: impl Into<Identifier>, f: impl IntoNativeFunction<Args> + 'static) -> &mut Self {
        self.register_native(name.into(), NativeImpl::Pure(f.into_native()));
        self
    }

    /// Replace the hook invoked by the guest `print` built-in. Defaults to
    /// printing to stdout with a trailing newline already applied by the
    /// built-in itself.
    pub fn on_print(&mut self, hook: impl FnMut(&str) + 'static) -> &mut Self {
        *self.print_hook.borrow_mut() = Box::new(hook);
        self
    }

    /// Seed a file's contents in the engine's virtual filesystem, for a
    /// script to subsequently `open`/`read`.
    pub fn seed_file(&self, path: impl Into<Identifier>, contents: impl Into<String>) -> &Self {
        self.vfs.seed(path.into(), contents.into());
        self
    }

    /// Read back a file's current contents from the virtual filesystem,
    /// e.g. after a script has `write`ten to it.
    #[must_use]
    pub fn read_file(&self, path: &str) -> Option<String> {
        self.vfs.snapshot(path)
    }

    /// Directly bind a value by name in the engine's global scope, without
    /// going through a script `=` assignment.
    pub fn set_global(&self, name: impl Into<Identifier>, value: Value) -> &Self {
        self.global.define(name.into(), value);
        self
    }

    /// Look up a global by name.
    #[must_use]
    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.global.get(name)
    }
}
