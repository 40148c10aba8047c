//! Standard built-ins, pre-seeded into every fresh [`crate::Engine`].
//!
//! Split into one module per concern: each package registers a handful of
//! related names into the engine's global scope.

mod collections;
mod fn_basic;
mod io_basic;
mod iter_basic;

use crate::engine::Engine;

pub(crate) fn register_all(engine: &Engine) {
    fn_basic::register(engine);
    iter_basic::register(engine);
    collections::register(engine);
    io_basic::register(engine);
}
