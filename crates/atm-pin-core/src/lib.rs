//! ATM PIN Core - PIN verification state machine
//!
//! This crate owns the whole verification session of an ATM-style PIN pad:
//! the digits entered so far, the failed attempt counter and the timed
//! lockout. It performs no I/O. Every event returns a [`Transition`] that a
//! rendering layer turns into pixels or terminal cells.

pub mod advisory;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod digit;
pub mod error;
pub mod state;
pub mod verifier;

pub use advisory::{Advisory, Transition};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::PinConfig;
pub use digit::Digit;
pub use error::{ConfigError, InputError, PinError, Result, StateError};
pub use state::{Phase, SessionState};
pub use verifier::PinVerifier;

/// Number of digits in a PIN
pub const PIN_LENGTH: usize = 4;

/// Default failed attempts before lockout
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default lockout duration in seconds (5 minutes)
pub const DEFAULT_LOCKOUT_SECS: u64 = 300;

/// Longest accepted lockout in seconds (30 days)
pub const MAX_LOCKOUT_SECS: u64 = 30 * 24 * 60 * 60;

/// Default code used when nothing else is configured
pub const DEFAULT_CODE: &str = "0789";
