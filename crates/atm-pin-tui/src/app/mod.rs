//! Application state and event handling

pub mod config;
pub mod events;
mod state;

pub use state::{AppState, CursorMove, KeypadKey, Notice, View, KEYPAD_COLS, KEYPAD_ROWS};

use std::time::{Duration, Instant};

use atm_pin_core::{Advisory, Clock, Digit, Phase, PinConfig, PinVerifier, SystemClock, Transition};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use crate::ui::{self, Theme};
use config::TuiConfig;
use events::{Event, EventHandler};

/// Application result type
pub type AppResult<T> = anyhow::Result<T>;

/// Main application struct
pub struct App<C: Clock + Clone = SystemClock> {
    /// The PIN state machine
    pub verifier: PinVerifier<C>,

    /// UI-only state
    pub state: AppState,

    /// Color palette
    pub theme: Theme,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Redraw and lockout check interval
    tick_rate: Duration,

    /// How long notices stay visible
    notice_hold: Duration,

    /// Time source shared with the verifier
    clock: C,
}

impl App<SystemClock> {
    /// Create a new application from a loaded configuration
    pub fn new(config: &TuiConfig) -> AppResult<Self> {
        let pin_config = config.pin_config()?;
        let mut app = Self::with_clock(pin_config, SystemClock);
        app.tick_rate = config.tick_rate();
        app.notice_hold = config.notice_hold();
        if config.high_contrast {
            app.theme = Theme::high_contrast();
        }
        Ok(app)
    }
}

impl<C: Clock + Clone> App<C> {
    /// Create an application with default display settings and a custom clock
    pub fn with_clock(pin_config: PinConfig, clock: C) -> Self {
        Self {
            verifier: PinVerifier::with_clock(pin_config, clock.clone()),
            state: AppState::new(),
            theme: Theme::default(),
            should_quit: false,
            tick_rate: Duration::from_millis(250),
            notice_hold: Duration::from_millis(500),
            clock,
        }
    }

    pub fn set_notice_hold(&mut self, hold: Duration) {
        self.notice_hold = hold;
    }

    /// Run the application main loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> AppResult<()> {
        let mut events = EventHandler::new(self.tick_rate);

        while !self.should_quit {
            // Lockout expiry is checked on every pass, before drawing
            self.on_tick();

            let view = self.view();
            terminal.draw(|frame| ui::render(frame, &view, &self.theme))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Tick | Event::Resize => {}
            }
        }

        Ok(())
    }

    /// Periodic work: lockout countdown and notice expiry
    pub fn on_tick(&mut self) {
        if self.verifier.phase() == Phase::Locked {
            let transition = self.verifier.tick(self.clock.now());
            if transition.phase == Phase::Entering {
                tracing::info!("Keypad re-enabled");
                self.state.notice = None;
            }
        }
        self.state.expire_notice(self.notice_hold, Instant::now());
    }

    /// Handle key press events
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global quit handlers
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        match self.verifier.phase() {
            Phase::Entering => self.handle_entry_key(key.code),
            Phase::Granted => self.handle_granted_key(key.code),
            Phase::Locked => self.handle_locked_key(key.code),
        }
    }

    fn handle_entry_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.state.move_cursor(CursorMove::Up),
            KeyCode::Down => self.state.move_cursor(CursorMove::Down),
            KeyCode::Left => self.state.move_cursor(CursorMove::Left),
            KeyCode::Right => self.state.move_cursor(CursorMove::Right),
            KeyCode::Char(' ') => {
                if let Some(key) = self.state.selected_key() {
                    self.press(key);
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Ok(digit) = Digit::try_from(c) {
                    self.press(KeypadKey::Digit(digit));
                }
            }
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('c') => {
                self.press(KeypadKey::Clear)
            }
            KeyCode::Enter | KeyCode::Char('e') => self.press(KeypadKey::Enter),
            _ => {}
        }
    }

    fn handle_granted_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Enter | KeyCode::Char('l')) {
            let transition = self.verifier.relock_pressed();
            self.apply(transition);
        }
    }

    fn handle_locked_key(&mut self, code: KeyCode) {
        // The keypad is suppressed; presses only confirm the lockout
        let transition = match code {
            KeyCode::Char(c) if c.is_ascii_digit() => match Digit::try_from(c) {
                Ok(digit) => self.verifier.digit_pressed(digit),
                Err(_) => return,
            },
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('e') => {
                self.verifier.enter_pressed()
            }
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('c') => {
                self.verifier.clear_pressed()
            }
            _ => return,
        };
        self.apply(transition);
    }

    /// Forward a keypad press to the verifier
    pub fn press(&mut self, key: KeypadKey) {
        let transition = match key {
            KeypadKey::Digit(digit) => self.verifier.digit_pressed(digit),
            KeypadKey::Clear => self.verifier.clear_pressed(),
            KeypadKey::Enter => self.verifier.enter_pressed(),
        };
        self.apply(transition);
    }

    fn apply(&mut self, transition: Transition) {
        match transition.advisory {
            Some(advisory @ (Advisory::IncompleteInput | Advisory::InvalidPin { .. })) => {
                self.state.notice = Some(Notice::new(advisory, Instant::now()));
            }
            // The lockout and success screens carry their own messages
            Some(Advisory::LockedOut { .. } | Advisory::AccessGranted) => {
                self.state.notice = None;
            }
            None => {
                if transition.phase != Phase::Entering {
                    self.state.notice = None;
                }
            }
        }
    }

    /// Snapshot for the renderer
    pub fn view(&self) -> View {
        View {
            phase: self.verifier.phase(),
            entered_len: self.verifier.entered_len(),
            attempt_count: self.verifier.attempt_count(),
            max_attempts: self.verifier.max_attempts(),
            last_attempt: self.verifier.is_last_attempt(),
            remaining_secs: self.verifier.remaining_seconds(),
            lockout_secs: self.verifier.config().lockout_secs(),
            progress: self.verifier.lockout_progress(),
            notice: self.state.notice.map(|n| n.advisory),
            keypad_index: self.state.keypad_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atm_pin_core::ManualClock;
    use chrono::{DateTime, Utc};
    use rstest::rstest;

    fn app() -> (App<ManualClock>, ManualClock) {
        let clock = ManualClock::new(DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap());
        (App::with_clock(PinConfig::default(), clock.clone()), clock)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_keys(app: &mut App<ManualClock>, keys: &str) {
        for c in keys.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_digit_keys_reach_verifier() {
        let (mut app, _) = app();
        type_keys(&mut app, "078");
        assert_eq!(app.view().entered_len, 3);

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.view().entered_len, 0);
    }

    #[test]
    fn test_keypad_cursor_press() {
        let (mut app, _) = app();
        // Move to "0" (bottom row, middle) and press it
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Down));
        }
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char(' ')));

        assert_eq!(app.verifier.state().entered_digits(), &[Digit::new(0).unwrap()]);
    }

    #[test]
    fn test_wrong_pin_shows_notice() {
        let (mut app, _) = app();
        type_keys(&mut app, "1234");
        app.handle_key(key(KeyCode::Enter));

        let view = app.view();
        assert_eq!(
            view.notice,
            Some(Advisory::InvalidPin {
                attempts_used: 1,
                max_attempts: 3
            })
        );
        assert_eq!(view.entered_len, 0);
        assert_eq!(view.attempt_count, 1);
    }

    #[test]
    fn test_notice_cleared_after_hold() {
        let (mut app, _) = app();
        app.set_notice_hold(Duration::ZERO);
        type_keys(&mut app, "07");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.view().notice, Some(Advisory::IncompleteInput));

        app.on_tick();
        assert_eq!(app.view().notice, None);
        assert_eq!(app.view().entered_len, 2);
    }

    #[test]
    fn test_lockout_and_recovery() {
        let (mut app, clock) = app();
        for _ in 0..3 {
            type_keys(&mut app, "1111");
            app.handle_key(key(KeyCode::Enter));
        }
        let view = app.view();
        assert_eq!(view.phase, Phase::Locked);
        assert_eq!(view.remaining_secs, Some(300));
        assert_eq!(view.progress, Some(1.0));
        assert_eq!(view.notice, None);

        // Keypad suppressed
        type_keys(&mut app, "0789");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.view().phase, Phase::Locked);

        clock.advance_secs(299);
        app.on_tick();
        assert_eq!(app.view().remaining_secs, Some(1));

        clock.advance_secs(1);
        app.on_tick();
        let view = app.view();
        assert_eq!(view.phase, Phase::Entering);
        assert_eq!(view.attempt_count, 0);
    }

    #[test]
    fn test_granted_and_relock() {
        let (mut app, _) = app();
        type_keys(&mut app, "0789");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.view().phase, Phase::Granted);

        // Digits do nothing on the success screen
        type_keys(&mut app, "1");
        assert_eq!(app.view().entered_len, 4);

        app.handle_key(key(KeyCode::Char('l')));
        let view = app.view();
        assert_eq!(view.phase, Phase::Entering);
        assert_eq!(view.entered_len, 0);
    }

    #[rstest]
    #[case::ctrl_c(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))]
    #[case::esc(key(KeyCode::Esc))]
    #[case::q(key(KeyCode::Char('q')))]
    fn test_quit_keys(#[case] event: KeyEvent) {
        let (mut app, _) = app();
        app.handle_key(event);
        assert!(app.should_quit);
    }

    #[rstest]
    #[case::backspace(KeyCode::Backspace)]
    #[case::delete(KeyCode::Delete)]
    #[case::letter(KeyCode::Char('c'))]
    fn test_clear_keys(#[case] code: KeyCode) {
        let (mut app, _) = app();
        type_keys(&mut app, "07");
        app.handle_key(key(code));
        assert_eq!(app.view().entered_len, 0);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_last_attempt_flag() {
        let (mut app, _) = app();
        for _ in 0..2 {
            type_keys(&mut app, "9999");
            app.handle_key(key(KeyCode::Enter));
        }
        assert!(app.view().last_attempt);
    }
}
