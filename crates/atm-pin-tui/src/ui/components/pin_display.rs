//! Masked PIN display

use atm_pin_core::PIN_LENGTH;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::Theme;

/// Marker drawn for each entered digit
pub const MASK: char = '●';

/// Marker drawn for each empty slot
pub const PLACEHOLDER: char = '○';

/// Render the entry as masking markers; digits are never shown
pub fn render(frame: &mut Frame, area: Rect, entered_len: usize, theme: &Theme) {
    let entered_len = entered_len.min(PIN_LENGTH);

    let mut spans = vec![Span::styled("[ ", theme.text_muted())];
    for i in 0..PIN_LENGTH {
        if i < entered_len {
            spans.push(Span::styled(MASK.to_string(), theme.pin_dot()));
        } else {
            spans.push(Span::styled(PLACEHOLDER.to_string(), theme.pin_placeholder()));
        }
        if i < PIN_LENGTH - 1 {
            spans.push(Span::raw(" "));
        }
    }
    spans.push(Span::styled(" ]", theme.text_muted()));

    let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
