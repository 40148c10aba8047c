//! # Pyrite — embedded scripting for Rust
//!
//! Pyrite is a small, indentation-sensitive scripting language interpreter
//! meant to be embedded inside a host Rust application.
//!
//! It provides a familiar syntax (`def`, `class`, `if`/`elif`/`else`, `while`,
//! `for ... in`, `lambda`, list/dict/tuple/set literals, keyword and variadic
//! arguments) and a simple Rust interface.
//!
//! # A Quick Example
//!
//! ```
//! use pyrite::Engine;
//!
//! fn main() -> Result<(), Box<pyrite::RuntimeError>> {
//!     let mut engine = Engine::new();
//!
//!     // Register a native function, callable from the guest script.
//!     engine.register_fn("double", |x: i64| x * 2);
//!
//!     engine.run("print(double(21))")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Documentation
//!
//! See `SPEC_FULL.md` in the repository root for the full language and
//! embedding-surface specification.

mod ast;
mod class;
mod engine;
mod engine_api;
mod engine_settings;
mod error;
mod error_parsing;
mod fn_call;
mod fn_native;
mod immutable_string;
mod packages;
mod parse;
mod scope;
mod token;
mod value;
mod vfs;

/// The system integer type used by the guest language. Fixed 64-bit signed.
pub type INT = i64;

/// The system floating-point type used by the guest language.
pub type FLOAT = f64;

pub use engine::{Engine, Limits};
pub use engine_api::EvalContext;
pub use error::RuntimeError;
pub use error_parsing::{LexError, ParseError, ParseErrorType};
pub use fn_native::NativeCallContext;
pub use immutable_string::ImmutableString;
pub use scope::Scope;
pub use token::Position;
pub use value::Value;

pub use ast::AST;

/// Variable-sized ordered collection of [`Value`]s. Backs the guest `list` type.
pub type Array = Vec<Value>;

/// Immutable reference-counted container.
///
/// Aliased so that a future `sync`-style build could swap in [`std::sync::Arc`]
/// without touching call sites.
pub(crate) use fn_native::Shared;

pub(crate) type SmartString = smartstring::SmartString<smartstring::Compact>;

/// An identifier in Pyrite source. [`SmartString`] is used because most
/// identifiers are ASCII and short, so they are stored inline without an
/// allocation.
pub(crate) type Identifier = SmartString;

/// A specialized [`Vec`] backed by a small, inline, fixed-size array for up to
/// four items, used for short positional-argument lists.
pub(crate) type StaticVec<T> = smallvec::SmallVec<[T; 4]>;
