//! TUI configuration persistence
//!
//! Loads the PIN pad settings (code, attempt limit, lockout length) and the
//! display preferences from a JSON file under the user config directory.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use atm_pin_core::{
    ConfigError as PinConfigError, PinConfig, DEFAULT_CODE, DEFAULT_LOCKOUT_SECS,
    DEFAULT_MAX_ATTEMPTS,
};
use serde::{Deserialize, Serialize};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Log file name, kept next to the config
const LOG_FILE_NAME: &str = "atm-pin.log";

/// Configuration directory under ~/.config
const CONFIG_DIR_NAME: &str = "atm-pin";

/// TUI configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Code that unlocks the pad
    #[serde(default = "default_code")]
    pub correct_code: String,

    /// Failed attempts before lockout
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Lockout length in seconds
    #[serde(default = "default_lockout_secs")]
    pub lockout_secs: u64,

    /// Redraw and lockout check interval in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// How long error messages stay on screen in milliseconds
    #[serde(default = "default_notice_hold_ms")]
    pub notice_hold_ms: u64,

    /// Use the high-contrast palette
    #[serde(default)]
    pub high_contrast: bool,
}

fn default_code() -> String {
    DEFAULT_CODE.to_string()
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_lockout_secs() -> u64 {
    DEFAULT_LOCKOUT_SECS
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_notice_hold_ms() -> u64 {
    500
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            correct_code: default_code(),
            max_attempts: default_max_attempts(),
            lockout_secs: default_lockout_secs(),
            tick_rate_ms: default_tick_rate_ms(),
            notice_hold_ms: default_notice_hold_ms(),
            high_contrast: false,
        }
    }
}

impl fmt::Debug for TuiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TuiConfig")
            .field("correct_code", &"<redacted>")
            .field("max_attempts", &self.max_attempts)
            .field("lockout_secs", &self.lockout_secs)
            .field("tick_rate_ms", &self.tick_rate_ms)
            .field("notice_hold_ms", &self.notice_hold_ms)
            .field("high_contrast", &self.high_contrast)
            .finish()
    }
}

impl TuiConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then fall back to ~/.config
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config).join(CONFIG_DIR_NAME);
            return Some(path);
        }

        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the full config file path
    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Get the log file path
    pub fn log_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(LOG_FILE_NAME))
    }

    /// Load configuration from the default location
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        Self::try_load_from(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config file: {}", e);
            Self::default()
        })
    }

    /// Load configuration from a path, reporting any failure
    pub fn try_load_from(path: &Path) -> Result<Self, TuiConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| TuiConfigError::Io(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| TuiConfigError::Parse(e.to_string()))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<PathBuf, TuiConfigError> {
        let path = Self::config_file_path().ok_or(TuiConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to a path
    pub fn save_to(&self, path: &Path) -> Result<(), TuiConfigError> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| TuiConfigError::Io(e.to_string()))?;
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TuiConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents).map_err(|e| TuiConfigError::Io(e.to_string()))?;

        // The file holds the unlock code
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .map_err(|e| TuiConfigError::Io(e.to_string()))?;
        }

        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Build the validated verifier configuration
    pub fn pin_config(&self) -> Result<PinConfig, TuiConfigError> {
        PinConfig::new(&self.correct_code, self.max_attempts, self.lockout_secs)
            .map_err(TuiConfigError::Pin)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn notice_hold(&self) -> Duration {
        Duration::from_millis(self.notice_hold_ms)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum TuiConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid PIN settings: {0}")]
    Pin(#[from] PinConfigError),
}
