//! Visual theme and color palette

use ratatui::style::{Color, Modifier, Style};

/// PIN pad color palette
pub struct Theme {
    // Branding
    pub accent: Color,
    pub panel: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub danger: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Keypad
    pub key_face: Color,
    pub key_label: Color,

    // Lockout gauge
    pub progress_filled: Color,
    pub progress_empty: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(33, 150, 243), // #2196F3 - Bank blue
            panel: Color::Rgb(33, 33, 33),    // #212121

            success: Color::Rgb(76, 175, 80), // #4CAF50 - Green
            warning: Color::Rgb(255, 152, 0), // #FF9800 - Orange
            danger: Color::Rgb(244, 67, 54),  // #F44336 - Red

            border: Color::Rgb(66, 66, 66),            // #424242
            border_focused: Color::Rgb(33, 150, 243),  // #2196F3
            text_primary: Color::Rgb(250, 250, 250),   // #FAFAFA
            text_secondary: Color::Rgb(189, 189, 189), // #BDBDBD
            text_muted: Color::Rgb(117, 117, 117),     // #757575

            key_face: Color::Rgb(48, 48, 48),
            key_label: Color::Rgb(250, 250, 250),

            progress_filled: Color::Rgb(244, 67, 54),
            progress_empty: Color::Rgb(66, 66, 66),
        }
    }
}

impl Theme {
    /// Get default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Get secondary text style
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Get muted text style
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Get focused border style
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    /// Get success style
    pub fn success(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    /// Get warning style
    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Get danger style
    pub fn danger(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    /// Get PIN dot style
    pub fn pin_dot(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Get PIN placeholder style
    pub fn pin_placeholder(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Get keypad key style
    pub fn key(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .bg(self.accent)
                .fg(self.key_label)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(self.key_face).fg(self.key_label)
        }
    }

    /// Get disabled keypad key style
    pub fn key_disabled(&self) -> Style {
        Style::default().bg(self.panel).fg(self.text_muted)
    }

    /// Get gauge style
    pub fn gauge(&self) -> Style {
        Style::default()
            .fg(self.progress_filled)
            .bg(self.progress_empty)
    }

    /// Create a high-contrast theme variant
    pub fn high_contrast() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::White,
            text_muted: Color::Gray,
            border: Color::White,
            border_focused: Color::Yellow,
            accent: Color::Yellow,
            key_face: Color::Black,
            ..Self::default()
        }
    }
}
