//! Numeric keypad grid

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{KEYPAD_COLS, KEYPAD_ROWS};
use crate::ui::Theme;

/// Width of one key cell
const KEY_WIDTH: u16 = 7;

/// Gap between keys
const KEY_GAP: u16 = 2;

/// Lines needed to draw the keypad
pub const KEYPAD_HEIGHT: u16 = (KEYPAD_ROWS.len() as u16) * 2 - 1;

/// Keypad widget state
pub struct Keypad {
    /// Highlighted key index (row-major)
    selected: usize,
    /// Whether presses are accepted
    enabled: bool,
}

impl Keypad {
    pub fn new(selected: usize) -> Self {
        Self {
            selected,
            enabled: true,
        }
    }

    /// Draw the keypad greyed out
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Label shown on a key face
    fn face(label: char) -> String {
        match label {
            'C' => " CLR ".to_string(),
            'E' => " ENT ".to_string(),
            c => format!("  {}  ", c),
        }
    }

    /// Render the keypad
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = KEY_WIDTH * KEYPAD_COLS as u16 + KEY_GAP * (KEYPAD_COLS as u16 - 1);
        let x = area.x + area.width.saturating_sub(width) / 2;

        for (row_index, row) in KEYPAD_ROWS.iter().enumerate() {
            let y = area.y + row_index as u16 * 2;
            if y >= area.bottom() {
                break;
            }

            for (col_index, label) in row.iter().enumerate() {
                let key_x = x + col_index as u16 * (KEY_WIDTH + KEY_GAP);
                if key_x + KEY_WIDTH > area.right() {
                    break;
                }

                let index = row_index * KEYPAD_COLS + col_index;
                let style = if !self.enabled {
                    theme.key_disabled()
                } else {
                    theme.key(index == self.selected)
                };

                let key = Paragraph::new(Self::face(*label))
                    .style(style)
                    .alignment(Alignment::Center);
                frame.render_widget(key, Rect::new(key_x, y, KEY_WIDTH, 1));
            }
        }
    }
}
