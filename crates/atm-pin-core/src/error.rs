//! Error types for the PIN core
//!
//! Wrong PINs, short entries and lockouts are not errors; they are
//! [`Advisory`](crate::Advisory) values. The types here cover the cases where
//! the caller handed the core something it cannot work with.

use thiserror::Error;

use crate::{MAX_LOCKOUT_SECS, PIN_LENGTH};

pub type Result<T> = std::result::Result<T, PinError>;

#[derive(Error, Debug)]
pub enum PinError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Session state error: {0}")]
    State(#[from] StateError),
}

/// Rejected verifier configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Code must be exactly {} digits (got {0})", PIN_LENGTH)]
    InvalidCodeLength(usize),

    #[error("Code must contain only digits")]
    NonDigitCode,

    #[error("Maximum attempts must be at least 1")]
    ZeroMaxAttempts,

    #[error("Lockout duration must be at least 1 second")]
    ZeroLockoutDuration,

    #[error("Lockout duration of {0} seconds exceeds the limit of {} seconds", MAX_LOCKOUT_SECS)]
    LockoutTooLong(u64),
}

/// Rejected keypad input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Not a decimal digit: {0:?}")]
    NotADigit(char),

    #[error("Digit value out of range: {0}")]
    OutOfRange(u8),
}

/// A session snapshot that cannot be adopted by a verifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Entered {0} digits, at most {} allowed", PIN_LENGTH)]
    TooManyDigits(usize),

    #[error("Attempt count {count} exceeds maximum {max}")]
    AttemptsExceeded { count: u32, max: u32 },

    #[error("Locked session has {count} attempts, lockout requires {max}")]
    LockedBelowThreshold { count: u32, max: u32 },

    #[error("Locked session has no lock start time")]
    MissingLockStart,

    #[error("Lock flag does not match phase")]
    LockPhaseMismatch,

    #[error("Granted session does not hold the correct code")]
    GrantedWithoutCode,
}
