//! Colours shared by the SortViz views.

use ratatui::style::{Color, Modifier, Style};

use sortviz_chart::renderer::LINE_COLOR;
use sortviz_chart::Rgb;
use sortviz_core::playback::PlaybackState;

/// Palette for panels, tables, status lines and the log.
pub struct ColorTheme {
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub text: Color,
    pub label: Color,
    pub muted: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            accent: to_color(LINE_COLOR),
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            text: Color::White,
            label: Color::Gray,
            muted: Color::DarkGray,
        }
    }
}

impl ColorTheme {
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Column headings of tables.
    #[must_use]
    pub fn heading_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    #[must_use]
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Field names in the key/value panels.
    #[must_use]
    pub fn label_style(&self) -> Style {
        Style::default().fg(self.label)
    }

    /// Panel borders and hints.
    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// In-flight requests and caveats.
    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Active tab, winning row, most probable class.
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Gauge colour for a playback state.
    #[must_use]
    pub fn playback_color(&self, state: PlaybackState) -> Color {
        match state {
            PlaybackState::Finished => self.success,
            PlaybackState::Paused => self.warning,
            PlaybackState::Playing | PlaybackState::Idle => self.accent,
        }
    }

    /// Log lines are coloured by their `[LEVEL]` prefix.
    #[must_use]
    pub fn log_style(&self, line: &str) -> Style {
        if line.starts_with("[ERROR]") {
            self.error_style()
        } else if line.starts_with("[WARN]") {
            self.warning_style()
        } else {
            Style::default()
        }
    }
}

/// Chart colour as a terminal colour.
#[must_use]
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
