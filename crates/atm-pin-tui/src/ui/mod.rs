//! UI rendering

pub mod components;
pub mod layout;
pub mod screens;
mod theme;

pub use theme::Theme;

use atm_pin_core::Phase;
use ratatui::prelude::*;

use crate::app::View;

/// Main render function - delegates to the screen for the current phase
pub fn render(frame: &mut Frame, view: &View, theme: &Theme) {
    let area = frame.area();
    match view.phase {
        Phase::Entering => screens::pin_entry::draw(frame, area, view, theme),
        Phase::Locked => screens::lockout::draw(frame, area, view, theme),
        Phase::Granted => screens::granted::draw(frame, area, view, theme),
    }
}
