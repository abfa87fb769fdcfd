//! PIN entry screen: masked display, keypad and attempt counter

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::View;
use crate::ui::components::keypad::{Keypad, KEYPAD_HEIGHT};
use crate::ui::components::pin_display;
use crate::ui::layout::centered_fixed;
use crate::ui::Theme;

/// Draw the PIN entry screen
pub fn draw(frame: &mut Frame, area: Rect, view: &View, theme: &Theme) {
    let dialog = centered_fixed(46, 24, area);

    let block = Block::default()
        .title(" ATM PIN Verification ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),             // Instructions
            Constraint::Length(2),             // PIN display
            Constraint::Length(2),             // Notice
            Constraint::Length(KEYPAD_HEIGHT), // Keypad
            Constraint::Length(1),             // Spacer
            Constraint::Length(1),             // Attempt counter
            Constraint::Length(1),             // Last attempt warning
            Constraint::Min(0),                // Spacer
            Constraint::Length(1),             // Help
        ])
        .split(inner);

    let instructions = Paragraph::new("Enter PIN")
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(instructions, chunks[0]);

    pin_display::render(frame, chunks[1], view.entered_len, theme);

    if let Some(notice) = &view.notice {
        let style = if notice.is_error() {
            theme.danger()
        } else {
            theme.warning()
        };
        let widget = Paragraph::new(notice.to_string())
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(widget, chunks[2]);
    }

    Keypad::new(view.keypad_index).render(frame, chunks[3], theme);

    let counter = Paragraph::new(format!(
        "Attempts: {}/{}",
        view.attempt_count, view.max_attempts
    ))
    .style(theme.text_muted())
    .alignment(Alignment::Center);
    frame.render_widget(counter, chunks[5]);

    if view.last_attempt {
        let warning = Paragraph::new("! Last attempt before card lock")
            .style(theme.warning())
            .alignment(Alignment::Center);
        frame.render_widget(warning, chunks[6]);
    }

    let help = Paragraph::new("0-9  C=clear  Enter=submit  Esc=quit")
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[8]);
}
