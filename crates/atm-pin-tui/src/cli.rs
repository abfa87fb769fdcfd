//! Command-line flags

use std::path::PathBuf;

use clap::Parser;

use crate::app::config::TuiConfig;

#[derive(Parser, Debug)]
#[command(name = "atm-pin")]
#[command(about = "ATM-style PIN pad with attempt counter and timed lockout", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Four-digit unlock code
    #[arg(long)]
    pub code: Option<String>,

    /// Failed attempts before lockout
    #[arg(short = 'm', long)]
    pub max_attempts: Option<u32>,

    /// Lockout length in seconds
    #[arg(short = 'l', long)]
    pub lockout_secs: Option<u64>,

    /// Redraw interval in milliseconds
    #[arg(long)]
    pub tick_rate_ms: Option<u64>,

    /// Use the high-contrast palette
    #[arg(long)]
    pub high_contrast: bool,

    /// Write the resulting configuration to the config file and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    /// Apply flag overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut TuiConfig) {
        if let Some(code) = &self.code {
            config.correct_code = code.clone();
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if let Some(lockout_secs) = self.lockout_secs {
            config.lockout_secs = lockout_secs;
        }
        if let Some(tick_rate_ms) = self.tick_rate_ms {
            config.tick_rate_ms = tick_rate_ms;
        }
        if self.high_contrast {
            config.high_contrast = true;
        }
    }
}
