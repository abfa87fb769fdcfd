//! Lockout screen displayed when too many PIN attempts fail

use atm_pin_core::countdown::{describe_lockout, format_countdown};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::View;
use crate::ui::components::keypad::{Keypad, KEYPAD_HEIGHT};
use crate::ui::components::progress::LockoutGauge;
use crate::ui::layout::centered_fixed;
use crate::ui::Theme;

/// Draw the lockout screen
pub fn draw(frame: &mut Frame, area: Rect, view: &View, theme: &Theme) {
    let dialog = centered_fixed(46, 24, area);

    // Dialog box with danger styling
    let block = Block::default()
        .title(" Card Blocked ")
        .title_style(theme.danger())
        .borders(Borders::ALL)
        .border_style(theme.danger());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),             // Banner
            Constraint::Length(3),             // Message
            Constraint::Length(2),             // Countdown
            Constraint::Length(1),             // Gauge
            Constraint::Length(1),             // Spacer
            Constraint::Length(KEYPAD_HEIGHT), // Disabled keypad
            Constraint::Min(0),                // Spacer
            Constraint::Length(1),             // Help
        ])
        .split(inner);

    let banner = Paragraph::new("!!  LOCKED  !!")
        .style(theme.danger())
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let message = format!(
        "{} failed PIN attempts.\nCard blocked for {}.",
        view.attempt_count,
        describe_lockout(view.lockout_secs)
    );
    let message_widget = Paragraph::new(message)
        .style(theme.text())
        .alignment(Alignment::Center);
    frame.render_widget(message_widget, chunks[1]);

    let remaining = view.remaining_secs.unwrap_or(0);
    let countdown = Paragraph::new(format!("Time remaining: {}", format_countdown(remaining)))
        .style(theme.warning())
        .alignment(Alignment::Center);
    frame.render_widget(countdown, chunks[2]);

    let gauge_area = Rect::new(
        chunks[3].x + 2,
        chunks[3].y,
        chunks[3].width.saturating_sub(4),
        chunks[3].height,
    );
    LockoutGauge::new(remaining, view.progress.unwrap_or(0.0)).render(frame, gauge_area, theme);

    Keypad::new(view.keypad_index)
        .disabled()
        .render(frame, chunks[5], theme);

    let help = Paragraph::new("[Esc] Quit")
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[7]);
}
