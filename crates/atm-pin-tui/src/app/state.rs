//! Application state

use std::time::{Duration, Instant};

use atm_pin_core::{Advisory, Digit, Phase};

/// Keypad rows as printed on the pad
pub const KEYPAD_ROWS: [[char; 3]; 4] = [
    ['1', '2', '3'],
    ['4', '5', '6'],
    ['7', '8', '9'],
    ['C', '0', 'E'],
];

/// Number of keypad columns
pub const KEYPAD_COLS: usize = 3;

/// Total keypad keys
pub const KEYPAD_KEYS: usize = 12;

/// A key on the on-screen keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadKey {
    Digit(Digit),
    Clear,
    Enter,
}

impl KeypadKey {
    /// Key at a position in row-major order
    pub fn at(index: usize) -> Option<Self> {
        let row = KEYPAD_ROWS.get(index / KEYPAD_COLS)?;
        Self::from_label(row[index % KEYPAD_COLS])
    }

    /// Key for a printed label
    pub fn from_label(label: char) -> Option<Self> {
        match label {
            'C' => Some(KeypadKey::Clear),
            'E' => Some(KeypadKey::Enter),
            c => Digit::try_from(c).ok().map(KeypadKey::Digit),
        }
    }
}

/// Cursor movement on the keypad grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Left,
    Right,
}

/// Transient message shown after a key press
#[derive(Debug, Clone, Copy)]
pub struct Notice {
    pub advisory: Advisory,
    shown_at: Instant,
}

impl Notice {
    pub fn new(advisory: Advisory, now: Instant) -> Self {
        Self {
            advisory,
            shown_at: now,
        }
    }

    /// Whether the hold time has passed at `now`
    pub fn is_expired(&self, hold: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= hold
    }
}

/// UI-only state that the verifier does not own
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Highlighted keypad key (row-major index)
    pub keypad_index: usize,

    /// Message from the last key press
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the keypad highlight, clamped to the grid
    pub fn move_cursor(&mut self, movement: CursorMove) {
        let rows = KEYPAD_KEYS / KEYPAD_COLS;
        let row = self.keypad_index / KEYPAD_COLS;
        let col = self.keypad_index % KEYPAD_COLS;

        let (row, col) = match movement {
            CursorMove::Up => (row.saturating_sub(1), col),
            CursorMove::Down => ((row + 1).min(rows - 1), col),
            CursorMove::Left => (row, col.saturating_sub(1)),
            CursorMove::Right => (row, (col + 1).min(KEYPAD_COLS - 1)),
        };
        self.keypad_index = row * KEYPAD_COLS + col;
    }

    pub fn selected_key(&self) -> Option<KeypadKey> {
        KeypadKey::at(self.keypad_index)
    }

    /// Drop the notice once its hold time is over
    pub fn expire_notice(&mut self, hold: Duration, now: Instant) {
        if self.notice.is_some_and(|n| n.is_expired(hold, now)) {
            self.notice = None;
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub phase: Phase,
    /// Number of masking markers to draw
    pub entered_len: usize,
    pub attempt_count: u32,
    pub max_attempts: u32,
    /// One more failure locks the pad
    pub last_attempt: bool,
    /// Seconds left in the lockout
    pub remaining_secs: Option<u64>,
    /// Full lockout length in seconds
    pub lockout_secs: u64,
    /// `remaining / lockout` ratio
    pub progress: Option<f64>,
    pub notice: Option<Advisory>,
    pub keypad_index: usize,
}
