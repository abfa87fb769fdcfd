//! ATM PIN Pad TUI Library
//!
//! Terminal rendering for the PIN verifier: masked entry, numeric keypad,
//! attempt counter, lockout countdown and the unlocked screen.

pub mod app;
pub mod cli;
pub mod ui;

pub use app::App;
