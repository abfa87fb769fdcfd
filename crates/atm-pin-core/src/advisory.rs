//! Outcomes returned by verifier events

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::Phase;

/// Non-fatal outcome of an event, meant for display
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Enter pressed with fewer than four digits
    IncompleteInput,
    /// Wrong code, still under the lockout threshold
    InvalidPin { attempts_used: u32, max_attempts: u32 },
    /// Pad is locked; input is ignored
    LockedOut { remaining_seconds: u64 },
    /// Correct code entered
    AccessGranted,
}

impl Advisory {
    /// Whether the renderer should treat this as a failure message
    pub fn is_error(&self) -> bool {
        matches!(self, Advisory::InvalidPin { .. } | Advisory::LockedOut { .. })
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::IncompleteInput => write!(f, "Please enter 4 digits"),
            Advisory::InvalidPin {
                attempts_used,
                max_attempts,
            } => write!(f, "Invalid PIN (Attempt {}/{})", attempts_used, max_attempts),
            Advisory::LockedOut { remaining_seconds } => write!(
                f,
                "Card blocked. Please try again in {}m {}s",
                remaining_seconds / 60,
                remaining_seconds % 60
            ),
            Advisory::AccessGranted => write!(f, "Access Granted"),
        }
    }
}

/// Result of feeding one event to the verifier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Phase after the event
    pub phase: Phase,
    /// Message for the renderer, if any
    pub advisory: Option<Advisory>,
}

impl Transition {
    pub fn quiet(phase: Phase) -> Self {
        Self {
            phase,
            advisory: None,
        }
    }

    pub fn with(phase: Phase, advisory: Advisory) -> Self {
        Self {
            phase,
            advisory: Some(advisory),
        }
    }
}
