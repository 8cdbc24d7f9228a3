//! Application runtime: terminal lifecycle and the event loop.

mod runtime;
mod terminal;

pub use runtime::{HEADLESS_ENV, history_store, reset_history, resolve_settings, run};
