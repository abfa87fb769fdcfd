//! Session state owned by the verifier

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::config::PinConfig;
use crate::digit::Digit;
use crate::error::StateError;
use crate::PIN_LENGTH;

/// Where the session is in the verification flow
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Accepting digits
    #[default]
    Entering,
    /// Correct code entered
    Granted,
    /// Too many failures; waiting out the lockout
    Locked,
}

/// Everything a single verification session knows
///
/// This is also the snapshot handed to renderers. Entered digits are wiped
/// from memory when the state is dropped or replaced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Digits entered so far (never more than four)
    pub(crate) entered_digits: Zeroizing<Vec<Digit>>,
    /// Failed attempts this session
    pub(crate) attempt_count: u32,
    /// Lockout flag
    pub(crate) locked: bool,
    /// When the lockout began
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) lock_start_time: Option<DateTime<Utc>>,
    /// Current phase
    pub(crate) phase: Phase,
}

impl SessionState {
    /// Fresh session: no digits, no failures, not locked
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entered_digits(&self) -> &[Digit] {
        &self.entered_digits
    }

    pub fn entered_len(&self) -> usize {
        self.entered_digits.len()
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock_start_time(&self) -> Option<DateTime<Utc>> {
        self.lock_start_time
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check the session invariants against a configuration
    pub fn validate(&self, config: &PinConfig) -> Result<(), StateError> {
        let max = config.max_attempts();

        if self.entered_digits.len() > PIN_LENGTH {
            return Err(StateError::TooManyDigits(self.entered_digits.len()));
        }
        if self.attempt_count > max {
            return Err(StateError::AttemptsExceeded {
                count: self.attempt_count,
                max,
            });
        }
        if self.locked != (self.phase == Phase::Locked) {
            return Err(StateError::LockPhaseMismatch);
        }
        if self.locked {
            if self.attempt_count < max {
                return Err(StateError::LockedBelowThreshold {
                    count: self.attempt_count,
                    max,
                });
            }
            if self.lock_start_time.is_none() {
                return Err(StateError::MissingLockStart);
            }
        }
        if self.phase == Phase::Granted && !config.matches(&self.entered_digits) {
            return Err(StateError::GrantedWithoutCode);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> Vec<Digit> {
        s.chars().map(|c| Digit::try_from(c).unwrap()).collect()
    }

    #[test]
    fn test_fresh_state() {
        let state = SessionState::new();
        assert_eq!(state.entered_len(), 0);
        assert_eq!(state.attempt_count(), 0);
        assert!(!state.is_locked());
        assert!(state.lock_start_time().is_none());
        assert_eq!(state.phase(), Phase::Entering);
        assert!(state.validate(&PinConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_broken_states() {
        let config = PinConfig::default();

        let too_long = SessionState {
            entered_digits: Zeroizing::new(digits("12345")),
            ..SessionState::new()
        };
        assert_eq!(too_long.validate(&config), Err(StateError::TooManyDigits(5)));

        let early_lock = SessionState {
            attempt_count: 1,
            locked: true,
            lock_start_time: Some(Utc::now()),
            phase: Phase::Locked,
            ..SessionState::new()
        };
        assert_eq!(
            early_lock.validate(&config),
            Err(StateError::LockedBelowThreshold { count: 1, max: 3 })
        );

        let no_start = SessionState {
            attempt_count: 3,
            locked: true,
            phase: Phase::Locked,
            ..SessionState::new()
        };
        assert_eq!(no_start.validate(&config), Err(StateError::MissingLockStart));

        let flag_only = SessionState {
            attempt_count: 3,
            locked: true,
            lock_start_time: Some(Utc::now()),
            ..SessionState::new()
        };
        assert_eq!(flag_only.validate(&config), Err(StateError::LockPhaseMismatch));

        let bad_grant = SessionState {
            entered_digits: Zeroizing::new(digits("1111")),
            phase: Phase::Granted,
            ..SessionState::new()
        };
        assert_eq!(bad_grant.validate(&config), Err(StateError::GrantedWithoutCode));
    }

    #[test]
    fn test_serde_surface() {
        let state = SessionState {
            entered_digits: Zeroizing::new(digits("07")),
            attempt_count: 1,
            ..SessionState::new()
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["entered_digits"], serde_json::json!([0, 7]));
        assert_eq!(json["attempt_count"], 1);
        assert_eq!(json["phase"], "entering");
        assert!(json.get("lock_start_time").is_none());

        let parsed: SessionState = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, state);
    }
}
