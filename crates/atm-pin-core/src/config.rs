//! Verifier configuration

use std::fmt;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::digit::Digit;
use crate::error::ConfigError;
use crate::{DEFAULT_CODE, DEFAULT_LOCKOUT_SECS, DEFAULT_MAX_ATTEMPTS, MAX_LOCKOUT_SECS, PIN_LENGTH};

/// Immutable settings of a [`PinVerifier`](crate::PinVerifier)
#[derive(Clone)]
pub struct PinConfig {
    /// The code that unlocks the pad
    correct_code: Zeroizing<Vec<Digit>>,
    /// Failed attempts before lockout
    max_attempts: u32,
    /// How long a lockout lasts
    lockout_duration: Duration,
}

impl PinConfig {
    /// Validate and build a configuration
    pub fn new(
        correct_code: &str,
        max_attempts: u32,
        lockout_secs: u64,
    ) -> Result<Self, ConfigError> {
        let len = correct_code.chars().count();
        if len != PIN_LENGTH {
            return Err(ConfigError::InvalidCodeLength(len));
        }

        let code = correct_code
            .chars()
            .map(Digit::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::NonDigitCode)?;

        if max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        if lockout_secs == 0 {
            return Err(ConfigError::ZeroLockoutDuration);
        }
        if lockout_secs > MAX_LOCKOUT_SECS {
            return Err(ConfigError::LockoutTooLong(lockout_secs));
        }

        Ok(Self {
            correct_code: Zeroizing::new(code),
            max_attempts,
            lockout_duration: Duration::from_secs(lockout_secs),
        })
    }

    /// Check an entry against the configured code
    pub fn matches(&self, entered: &[Digit]) -> bool {
        self.correct_code.as_slice() == entered
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn lockout_duration(&self) -> Duration {
        self.lockout_duration
    }

    pub fn lockout_secs(&self) -> u64 {
        self.lockout_duration.as_secs()
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            correct_code: Zeroizing::new(
                DEFAULT_CODE
                    .chars()
                    .filter_map(|c| Digit::try_from(c).ok())
                    .collect(),
            ),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            lockout_duration: Duration::from_secs(DEFAULT_LOCKOUT_SECS),
        }
    }
}

// The code stays out of logs and panic messages
impl fmt::Debug for PinConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinConfig")
            .field("correct_code", &"<redacted>")
            .field("max_attempts", &self.max_attempts)
            .field("lockout_duration", &self.lockout_duration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> Vec<Digit> {
        s.chars().map(|c| Digit::try_from(c).unwrap()).collect()
    }

    #[test]
    fn test_default_config() {
        let config = PinConfig::default();
        assert!(config.matches(&digits("0789")));
        assert_eq!(config.max_attempts(), 3);
        assert_eq!(config.lockout_secs(), 300);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            PinConfig::new("123", 3, 300).unwrap_err(),
            ConfigError::InvalidCodeLength(3)
        );
        assert_eq!(
            PinConfig::new("12345", 3, 300).unwrap_err(),
            ConfigError::InvalidCodeLength(5)
        );
        assert_eq!(
            PinConfig::new("12a4", 3, 300).unwrap_err(),
            ConfigError::NonDigitCode
        );
        assert_eq!(
            PinConfig::new("1234", 0, 300).unwrap_err(),
            ConfigError::ZeroMaxAttempts
        );
        assert_eq!(
            PinConfig::new("1234", 3, 0).unwrap_err(),
            ConfigError::ZeroLockoutDuration
        );
        assert!(PinConfig::new("0000", 1, 1).is_ok());
    }

    #[test]
    fn test_lockout_limit() {
        assert!(PinConfig::new("0789", 3, MAX_LOCKOUT_SECS).is_ok());
        assert_eq!(
            PinConfig::new("0789", 3, MAX_LOCKOUT_SECS + 1).unwrap_err(),
            ConfigError::LockoutTooLong(MAX_LOCKOUT_SECS + 1)
        );
        assert_eq!(
            PinConfig::new("0789", 1, 10_000_000_000_000).unwrap_err(),
            ConfigError::LockoutTooLong(10_000_000_000_000)
        );
    }

    #[test]
    fn test_matches() {
        let config = PinConfig::new("4321", 3, 60).unwrap();
        assert!(config.matches(&digits("4321")));
        assert!(!config.matches(&digits("1234")));
        assert!(!config.matches(&digits("432")));
    }

    #[test]
    fn test_debug_redacts_code() {
        let config = PinConfig::new("5555", 3, 60).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("5555"));
        assert!(debug.contains("<redacted>"));
    }
}
