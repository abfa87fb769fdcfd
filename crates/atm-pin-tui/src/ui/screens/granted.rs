//! Success screen shown after the correct PIN

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::View;
use crate::ui::components::pin_display;
use crate::ui::layout::centered_fixed;
use crate::ui::Theme;

/// Draw the access granted screen
pub fn draw(frame: &mut Frame, area: Rect, view: &View, theme: &Theme) {
    let dialog = centered_fixed(46, 14, area);

    let block = Block::default()
        .title(" ATM PIN Verification ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.success());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // PIN display
            Constraint::Length(2), // Success banner
            Constraint::Length(3), // Lock button
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    pin_display::render(frame, chunks[0], view.entered_len, theme);

    let banner = Paragraph::new("Access Granted")
        .style(theme.success())
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[1]);

    let button = Paragraph::new("[ Lock System ]")
        .style(theme.key(true))
        .alignment(Alignment::Center);
    let button_area = Rect::new(
        chunks[2].x + chunks[2].width.saturating_sub(17) / 2,
        chunks[2].y + 1,
        17.min(chunks[2].width),
        1,
    );
    frame.render_widget(button, button_area);

    let help = Paragraph::new("[L] / [Enter] Lock    [Esc] Quit")
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}
