//! ATM PIN Pad - Terminal Interface
//!
//! Renders a numeric keypad, accepts a four-digit PIN and locks the pad for a
//! fixed time after too many failed attempts.

use std::fs::{self, OpenOptions};
use std::io;
use std::panic;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use atm_pin_tui::app::config::TuiConfig;
use atm_pin_tui::cli::Cli;
use atm_pin_tui::App;

/// Application entry point with panic handling for terminal restoration
fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging()?;

    let mut config = match &cli.config {
        Some(path) => TuiConfig::try_load_from(path)?,
        None => TuiConfig::load(),
    };
    cli.apply(&mut config);

    // Reject bad settings before touching the terminal
    config.pin_config()?;

    if cli.write_config {
        let path = match &cli.config {
            Some(path) => {
                config.save_to(path)?;
                path.clone()
            }
            None => config.save()?,
        };
        println!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    // Set up panic hook to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    tracing::info!(
        max_attempts = config.max_attempts,
        lockout_secs = config.lockout_secs,
        "Starting PIN pad"
    );

    let result = run_app(&config);

    if let Err(e) = &result {
        tracing::error!("Application error: {}", e);
    }

    result
}

/// Log to a file beside the config so the terminal UI stays clean
fn init_logging() -> Result<()> {
    let file_layer = match TuiConfig::log_file_path() {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("atm_pin_tui=info".parse()?)
                .add_directive("atm_pin_core=info".parse()?),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Main application runner
fn run_app(config: &TuiConfig) -> Result<()> {
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
