//! Lockout countdown gauge

use atm_pin_core::countdown::format_countdown;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge};

use crate::ui::Theme;

/// Gauge that drains as the lockout runs out
pub struct LockoutGauge {
    /// Remaining fraction (0.0 - 1.0)
    ratio: f64,
    /// Seconds left
    remaining_secs: u64,
}

impl LockoutGauge {
    pub fn new(remaining_secs: u64, ratio: f64) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            remaining_secs,
        }
    }

    /// Label drawn over the gauge
    pub fn label(&self) -> String {
        format!("{} remaining", format_countdown(self.remaining_secs))
    }

    /// Render the gauge
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::NONE))
            .gauge_style(theme.gauge())
            .ratio(self.ratio)
            .label(self.label());

        frame.render_widget(gauge, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_and_clamp() {
        let gauge = LockoutGauge::new(125, 1.7);
        assert_eq!(gauge.label(), "02:05 remaining");
        assert_eq!(gauge.ratio, 1.0);
    }
}
