//! The engine-resource-backed built-ins: `print`, `open`, `input` at global
//! scope, plus `read`/`readline`/`write`/`close` as bound `file` methods
//! (`f.read()`) — see [`Engine::eval_attr`], which binds the receiving
//! [`Value::File`] as `bound_args` on the returned native function.
//!
//! None of these can be registered as ordinary
//! [`crate::fn_native::NativeFunction`] closures because they need to reach
//! the engine's print hook, VFS, or host stdin — resources a `'static`
//! closure can't capture by reference. Instead each guest-visible name is
//! registered via [`Engine::register_special`] and dispatched here, from
//! [`Engine::call_special`], which *does* have `&self`.

use crate::engine::Engine;
use crate::error::RuntimeError;
use crate::fn_native::{Shared, Special};
use crate::token::Position;
use crate::value::Value;
use crate::vfs::{FileHandle, OpenMode};
use crate::Identifier;
use std::cell::RefCell;
use std::io::{self, Write as _};

pub(super) fn register(engine: &Engine) {
    engine.register_special("print", Special::Print);
    engine.register_special("open", Special::Open);
    engine.register_special("input", Special::Input);
}

impl Engine {
    pub(crate) fn call_special(
        &self,
        special: Special,
        _fn_name: &str,
        args: &mut Vec<Value>,
        kwargs: &mut Vec<(Identifier, Value)>,
        pos: Position,
    ) -> Result<Value, RuntimeError> {
        match special {
            Special::Print => self.builtin_print(args, kwargs, pos),
            Special::Open => self.builtin_open(args, pos),
            Special::Read => self.builtin_read(args, pos),
            Special::ReadLine => self.builtin_readline(args, pos),
            Special::Write => self.builtin_write(args, pos),
            Special::Close => self.builtin_close(args, pos),
            Special::Input => self.builtin_input(args, pos),
        }
    }

    fn builtin_print(
        &self,
        args: &[Value],
        kwargs: &mut Vec<(Identifier, Value)>,
        pos: Position,
    ) -> Result<Value, RuntimeError> {
        let sep = take_str_kwarg(kwargs, "sep", " ", pos)?;
        let end = take_str_kwarg(kwargs, "end", "\n", pos)?;
        if let Some((name, _)) = kwargs.first() {
            return Err(RuntimeError::ArityError(
                format!("'print' got an unexpected keyword argument '{name}'"),
                pos,
            ));
        }
        let rendered: Vec<String> = args.iter().map(Value::to_display_string).collect();
        self.print(&rendered.join(&sep));
        self.print(&end);
        Ok(Value::None)
    }

    fn builtin_open(&self, args: &[Value], pos: Position) -> Result<Value, RuntimeError> {
        let path = match args.first() {
            Some(Value::Str(s)) => s.to_string(),
            _ => {
                return Err(RuntimeError::TypeError(
                    "open() expected a str path".to_string(),
                    pos,
                ))
            }
        };
        let mode_str = match args.get(1) {
            Some(Value::Str(s)) => s.to_string(),
            None => "r".to_string(),
            _ => {
                return Err(RuntimeError::TypeError(
                    "open() expected a str mode".to_string(),
                    pos,
                ))
            }
        };
        let mode = match mode_str.as_str() {
            "r" => OpenMode::Read,
            "w" => OpenMode::Write,
            "a" => OpenMode::Append,
            other => {
                return Err(RuntimeError::ValueError(format!("invalid mode: '{other}'"), pos))
            }
        };
        let handle = self
            .vfs
            .open(&path, mode)
            .map_err(|msg| RuntimeError::ValueError(msg, pos))?;
        Ok(Value::File(Shared::new(RefCell::new(handle))))
    }

    fn builtin_read(&self, args: &[Value], pos: Position) -> Result<Value, RuntimeError> {
        let handle = expect_file(args, pos)?;
        if handle.borrow().is_closed() {
            return Err(RuntimeError::ValueError(
                "I/O operation on closed file".to_string(),
                pos,
            ));
        }
        Ok(Value::Str(handle.borrow_mut().read().into()))
    }

    fn builtin_readline(&self, args: &[Value], pos: Position) -> Result<Value, RuntimeError> {
        let handle = expect_file(args, pos)?;
        if handle.borrow().is_closed() {
            return Err(RuntimeError::ValueError(
                "I/O operation on closed file".to_string(),
                pos,
            ));
        }
        Ok(Value::Str(handle.borrow_mut().read_line().into()))
    }

    fn builtin_write(&self, args: &[Value], pos: Position) -> Result<Value, RuntimeError> {
        let data = match args.get(1) {
            Some(Value::Str(s)) => s.to_string(),
            _ => {
                return Err(RuntimeError::TypeError(
                    "write() expected a str argument".to_string(),
                    pos,
                ))
            }
        };
        let handle = expect_file(args, pos)?;
        if handle.borrow().is_closed() {
            return Err(RuntimeError::ValueError(
                "I/O operation on closed file".to_string(),
                pos,
            ));
        }
        handle.borrow_mut().write(&data);
        Ok(Value::None)
    }

    fn builtin_close(&self, args: &[Value], pos: Position) -> Result<Value, RuntimeError> {
        let handle = expect_file(args, pos)?;
        self.vfs.close(&mut handle.borrow_mut());
        Ok(Value::None)
    }

    fn builtin_input(&self, args: &[Value], pos: Position) -> Result<Value, RuntimeError> {
        if let Some(Value::Str(prompt)) = args.first() {
            self.print(prompt);
        }
        io::stdout().flush().ok();
        let mut line = String::new();
        io::stdin()
            .read_line(&mut line)
            .map_err(|e| RuntimeError::NativeError(format!("input() failed: {e}"), pos))?;
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Value::Str(line.into()))
    }
}

fn expect_file(args: &[Value], pos: Position) -> Result<Shared<RefCell<FileHandle>>, RuntimeError> {
    match args.first() {
        Some(Value::File(f)) => Ok(f.clone()),
        Some(other) => Err(RuntimeError::TypeError(
            format!("expected a file, found '{}'", other.type_name()),
            pos,
        )),
        None => Err(RuntimeError::ArityError(
            "expected a file argument".to_string(),
            pos,
        )),
    }
}

fn take_str_kwarg(
    kwargs: &mut Vec<(Identifier, Value)>,
    name: &str,
    default: &str,
    pos: Position,
) -> Result<String, RuntimeError> {
    match kwargs.iter().position(|(n, _)| n == name) {
        Some(idx) => match kwargs.remove(idx).1 {
            Value::Str(s) => Ok(s.to_string()),
            other => Err(RuntimeError::TypeError(
                format!("'{name}' must be a str, not '{}'", other.type_name()),
                pos,
            )),
        },
        None => Ok(default.to_string()),
    }
}
