//! Library entry for keybind-master exposing the capture input, history and
//! terminal runtime for the binary and integration tests.

pub mod app;
pub mod args;
pub mod capture;
pub mod config;
pub mod events;
pub mod history;
pub mod keys;
pub mod state;
pub mod ui;
