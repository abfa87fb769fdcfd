//! PIN verification state machine
//!
//! The verifier moves between three phases:
//!
//! - `Entering`: digits are collected, Enter checks them
//! - `Granted`: the correct code was entered, only re-lock does anything
//! - `Locked`: too many failures, only the passage of time does anything
//!
//! Every event returns a [`Transition`] describing the new phase and an
//! optional [`Advisory`] for display. No event fails.

use chrono::{DateTime, Duration, Utc};
use zeroize::Zeroize;

use crate::advisory::{Advisory, Transition};
use crate::clock::{Clock, SystemClock};
use crate::config::PinConfig;
use crate::countdown;
use crate::digit::Digit;
use crate::error::StateError;
use crate::state::{Phase, SessionState};
use crate::PIN_LENGTH;

/// Owns one verification session
#[derive(Debug)]
pub struct PinVerifier<C: Clock = SystemClock> {
    config: PinConfig,
    state: SessionState,
    clock: C,
}

impl<C: Clock> PinVerifier<C> {
    /// Create a verifier with a custom time source
    pub fn with_clock(config: PinConfig, clock: C) -> Self {
        Self {
            config,
            state: SessionState::new(),
            clock,
        }
    }

    /// Adopt a previously captured session
    pub fn with_state(config: PinConfig, clock: C, state: SessionState) -> Result<Self, StateError> {
        state.validate(&config)?;
        Ok(Self {
            config,
            state,
            clock,
        })
    }

    /// Append a digit to the entry
    pub fn digit_pressed(&mut self, digit: Digit) -> Transition {
        match self.state.phase {
            Phase::Entering => {
                if self.state.entered_digits.len() < PIN_LENGTH {
                    self.state.entered_digits.push(digit);
                    tracing::debug!(entered = self.state.entered_digits.len(), "Digit entered");
                }
                Transition::quiet(Phase::Entering)
            }
            Phase::Locked => self.locked_out(),
            Phase::Granted => Transition::quiet(Phase::Granted),
        }
    }

    /// Discard the current entry
    pub fn clear_pressed(&mut self) -> Transition {
        match self.state.phase {
            Phase::Entering => {
                self.state.entered_digits.zeroize();
                tracing::debug!("Entry cleared");
                Transition::quiet(Phase::Entering)
            }
            Phase::Locked => self.locked_out(),
            Phase::Granted => Transition::quiet(Phase::Granted),
        }
    }

    /// Check the entry against the configured code
    pub fn enter_pressed(&mut self) -> Transition {
        match self.state.phase {
            Phase::Entering => self.verify_entry(),
            Phase::Locked => self.locked_out(),
            Phase::Granted => Transition::quiet(Phase::Granted),
        }
    }

    /// Re-check the lockout against `now`
    pub fn tick(&mut self, now: DateTime<Utc>) -> Transition {
        if self.state.phase != Phase::Locked {
            return Transition::quiet(self.state.phase);
        }

        let remaining = self.remaining_at(now);
        if remaining == 0 {
            tracing::info!("Lockout expired, session reset");
            self.reset();
            Transition::quiet(Phase::Entering)
        } else {
            Transition::with(
                Phase::Locked,
                Advisory::LockedOut {
                    remaining_seconds: remaining,
                },
            )
        }
    }

    /// Lock the pad again after a successful unlock
    pub fn relock_pressed(&mut self) -> Transition {
        if self.state.phase != Phase::Granted {
            return Transition::quiet(self.state.phase);
        }
        tracing::info!("System re-locked");
        self.reset();
        Transition::quiet(Phase::Entering)
    }

    fn verify_entry(&mut self) -> Transition {
        if self.state.entered_digits.len() != PIN_LENGTH {
            return Transition::with(Phase::Entering, Advisory::IncompleteInput);
        }

        if self.config.matches(&self.state.entered_digits) {
            tracing::info!(attempts = self.state.attempt_count, "Access granted");
            self.state.phase = Phase::Granted;
            return Transition::with(Phase::Granted, Advisory::AccessGranted);
        }

        let max = self.config.max_attempts();
        self.state.attempt_count = (self.state.attempt_count + 1).min(max);
        self.state.entered_digits.zeroize();
        tracing::warn!(
            attempt = self.state.attempt_count,
            max_attempts = max,
            "Invalid PIN"
        );

        if self.state.attempt_count >= max {
            self.state.locked = true;
            self.state.lock_start_time = Some(self.clock.now());
            self.state.phase = Phase::Locked;
            tracing::warn!(
                lockout_secs = self.config.lockout_secs(),
                "Maximum attempts reached, pad locked"
            );
            return Transition::with(
                Phase::Locked,
                Advisory::LockedOut {
                    remaining_seconds: self.config.lockout_secs(),
                },
            );
        }

        Transition::with(
            Phase::Entering,
            Advisory::InvalidPin {
                attempts_used: self.state.attempt_count,
                max_attempts: max,
            },
        )
    }

    fn locked_out(&self) -> Transition {
        Transition::with(
            Phase::Locked,
            Advisory::LockedOut {
                remaining_seconds: self.remaining_seconds().unwrap_or(0),
            },
        )
    }

    fn reset(&mut self) {
        self.state = SessionState::new();
    }

    fn remaining_at(&self, now: DateTime<Utc>) -> u64 {
        match self.lock_expires_at() {
            Some(expires) => countdown::remaining_seconds(expires, now),
            None => 0,
        }
    }

    /// Instant the current lockout ends, if locked
    ///
    /// An end past chrono's range saturates to the latest representable
    /// instant, so the lockout holds.
    pub fn lock_expires_at(&self) -> Option<DateTime<Utc>> {
        let start = self.state.lock_start_time?;
        let expires = Duration::from_std(self.config.lockout_duration())
            .ok()
            .and_then(|lockout| start.checked_add_signed(lockout))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Some(expires)
    }

    /// Seconds left in the lockout by the verifier's clock
    pub fn remaining_seconds(&self) -> Option<u64> {
        if self.state.phase != Phase::Locked {
            return None;
        }
        Some(self.remaining_at(self.clock.now()))
    }

    /// Fraction of the lockout still to run
    pub fn lockout_progress(&self) -> Option<f64> {
        self.remaining_seconds()
            .map(|remaining| countdown::lockout_progress(remaining, self.config.lockout_secs()))
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Snapshot for rendering
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &PinConfig {
        &self.config
    }

    pub fn entered_len(&self) -> usize {
        self.state.entered_digits.len()
    }

    pub fn attempt_count(&self) -> u32 {
        self.state.attempt_count
    }

    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts()
    }

    /// Failed attempts left before lockout
    pub fn attempts_remaining(&self) -> u32 {
        self.config
            .max_attempts()
            .saturating_sub(self.state.attempt_count)
    }

    /// One more failure locks the pad
    pub fn is_last_attempt(&self) -> bool {
        self.state.phase == Phase::Entering && self.attempts_remaining() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn verifier() -> (PinVerifier<ManualClock>, ManualClock) {
        let clock = ManualClock::new(t0());
        (
            PinVerifier::with_clock(PinConfig::default(), clock.clone()),
            clock,
        )
    }

    fn press(verifier: &mut PinVerifier<ManualClock>, code: &str) {
        for c in code.chars() {
            verifier.digit_pressed(Digit::try_from(c).unwrap());
        }
    }

    fn lock(verifier: &mut PinVerifier<ManualClock>) {
        for _ in 0..verifier.max_attempts() {
            press(verifier, "1111");
            verifier.enter_pressed();
        }
        assert_eq!(verifier.phase(), Phase::Locked);
    }

    #[test]
    fn test_initial_state() {
        let (verifier, _) = verifier();
        assert_eq!(verifier.phase(), Phase::Entering);
        assert_eq!(verifier.entered_len(), 0);
        assert_eq!(verifier.attempt_count(), 0);
        assert_eq!(verifier.attempts_remaining(), 3);
        assert!(verifier.remaining_seconds().is_none());
    }

    #[test]
    fn test_fifth_digit_ignored() {
        let (mut verifier, _) = verifier();
        press(&mut verifier, "07891");
        assert_eq!(verifier.entered_len(), 4);
        assert_eq!(verifier.enter_pressed().phase, Phase::Granted);
    }

    #[test]
    fn test_locking_attempt_reports_full_lockout() {
        let (mut verifier, _) = verifier();
        press(&mut verifier, "1111");
        verifier.enter_pressed();
        press(&mut verifier, "1111");
        verifier.enter_pressed();
        press(&mut verifier, "1111");
        let transition = verifier.enter_pressed();

        assert_eq!(
            transition,
            Transition::with(
                Phase::Locked,
                Advisory::LockedOut {
                    remaining_seconds: 300
                }
            )
        );
        assert!(verifier.state().is_locked());
        assert_eq!(verifier.state().lock_start_time(), Some(t0()));
    }

    #[test]
    fn test_presses_while_locked_report_remaining() {
        let (mut verifier, clock) = verifier();
        lock(&mut verifier);
        clock.advance_secs(60);

        let before = verifier.state().clone();
        let expected = Transition::with(
            Phase::Locked,
            Advisory::LockedOut {
                remaining_seconds: 240,
            },
        );
        assert_eq!(verifier.digit_pressed(Digit::new(0).unwrap()), expected);
        assert_eq!(verifier.clear_pressed(), expected);
        assert_eq!(verifier.enter_pressed(), expected);
        assert_eq!(verifier.relock_pressed(), Transition::quiet(Phase::Locked));
        assert_eq!(verifier.state(), &before);
    }

    #[test]
    fn test_progress_and_expiry() {
        let (mut verifier, clock) = verifier();
        lock(&mut verifier);
        assert_eq!(verifier.lock_expires_at(), Some(t0() + Duration::seconds(300)));
        assert_eq!(verifier.lockout_progress(), Some(1.0));

        clock.advance_secs(150);
        assert_eq!(verifier.lockout_progress(), Some(0.5));
    }

    #[test]
    fn test_longest_lockout_holds() {
        let clock = ManualClock::new(t0());
        let config = PinConfig::new("0789", 1, crate::MAX_LOCKOUT_SECS).unwrap();
        let mut verifier = PinVerifier::with_clock(config, clock);
        press(&mut verifier, "1111");
        verifier.enter_pressed();

        let transition = verifier.tick(t0() + Duration::seconds(1));
        assert_eq!(
            transition,
            Transition::with(
                Phase::Locked,
                Advisory::LockedOut {
                    remaining_seconds: crate::MAX_LOCKOUT_SECS - 1
                }
            )
        );
        assert_eq!(verifier.attempt_count(), 1);
    }

    #[test]
    fn test_expiry_past_range_saturates() {
        let start = DateTime::<Utc>::MAX_UTC - Duration::seconds(10);
        let state = SessionState {
            attempt_count: 3,
            locked: true,
            lock_start_time: Some(start),
            phase: Phase::Locked,
            ..SessionState::new()
        };
        let mut verifier =
            PinVerifier::with_state(PinConfig::default(), ManualClock::new(start), state).unwrap();
        assert_eq!(verifier.lock_expires_at(), Some(DateTime::<Utc>::MAX_UTC));

        let transition = verifier.tick(start + Duration::seconds(1));
        assert_eq!(transition.phase, Phase::Locked);
        assert_eq!(verifier.attempt_count(), 3);
        assert_eq!(verifier.remaining_seconds(), Some(10));
    }

    #[test]
    fn test_granted_ignores_keypad() {
        let (mut verifier, _) = verifier();
        press(&mut verifier, "0789");
        verifier.enter_pressed();

        assert_eq!(
            verifier.digit_pressed(Digit::new(1).unwrap()),
            Transition::quiet(Phase::Granted)
        );
        assert_eq!(verifier.clear_pressed(), Transition::quiet(Phase::Granted));
        assert_eq!(verifier.enter_pressed(), Transition::quiet(Phase::Granted));
        assert_eq!(verifier.tick(t0()), Transition::quiet(Phase::Granted));
        assert_eq!(verifier.entered_len(), 4);
    }

    #[test]
    fn test_relock_outside_granted_is_noop() {
        let (mut verifier, _) = verifier();
        press(&mut verifier, "12");
        assert_eq!(verifier.relock_pressed(), Transition::quiet(Phase::Entering));
        assert_eq!(verifier.entered_len(), 2);
    }

    #[test]
    fn test_last_attempt_warning() {
        let (mut verifier, _) = verifier();
        assert!(!verifier.is_last_attempt());
        press(&mut verifier, "1111");
        verifier.enter_pressed();
        assert!(!verifier.is_last_attempt());
        press(&mut verifier, "1111");
        verifier.enter_pressed();
        assert!(verifier.is_last_attempt());
    }

    #[test]
    fn test_single_attempt_config() {
        let clock = ManualClock::new(t0());
        let config = PinConfig::new("1234", 1, 10).unwrap();
        let mut verifier = PinVerifier::with_clock(config, clock);
        assert!(verifier.is_last_attempt());

        press(&mut verifier, "4321");
        assert_eq!(verifier.enter_pressed().phase, Phase::Locked);
        assert_eq!(verifier.attempt_count(), 1);
    }

    #[test]
    fn test_with_state_roundtrip_and_rejection() {
        let (mut verifier, clock) = verifier();
        lock(&mut verifier);
        let snapshot = verifier.state().clone();

        let mut restored =
            PinVerifier::with_state(PinConfig::default(), clock.clone(), snapshot).unwrap();
        assert_eq!(restored.phase(), Phase::Locked);
        assert_eq!(
            restored.tick(t0() + Duration::seconds(300)),
            Transition::quiet(Phase::Entering)
        );

        // Three attempts lock a default pad but exceed a two-attempt one
        let strict = PinConfig::new("0789", 2, 300).unwrap();
        let err = PinVerifier::with_state(strict, clock, verifier.state().clone()).unwrap_err();
        assert_eq!(err, StateError::AttemptsExceeded { count: 3, max: 2 });
    }
}
