//! Reusable UI components

pub mod keypad;
pub mod pin_display;
pub mod progress;
