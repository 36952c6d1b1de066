//! TUI footer panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::keymap::View;
use crate::styles::ColorTheme;

/// Key hints shown for `view`.
#[must_use]
pub fn hints(view: View) -> &'static [(&'static str, &'static str)] {
    match view {
        View::Visualizer => &[
            ("enter", "run"),
            ("space", "play/pause"),
            ("s", "stop"),
            ("+/-", "speed"),
            ("←/→", "algorithm"),
            ("[/]", "size"),
            ("d", "distribution"),
            ("m", "select"),
            ("c", "compare"),
            ("q", "quit"),
        ],
        View::Data => &[
            ("enter/r", "refresh"),
            ("f", "filter"),
            ("↑/↓", "scroll log"),
            ("tab", "next view"),
            ("q", "quit"),
        ],
        View::Predict => &[
            ("enter", "predict"),
            ("←/→", "algorithm"),
            ("[/]", "size"),
            ("d", "distribution"),
            ("t", "train"),
            ("q", "quit"),
        ],
    }
}

/// Render the footer with the current status and the view's key hints.
pub fn render_footer(frame: &mut Frame, area: Rect, view: View, status: Option<&str>) {
    let theme = ColorTheme::default();
    let mut spans = Vec::new();
    for (i, (key, action)) in hints(view).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(*key, theme.warning_style()));
        spans.push(Span::raw(format!(": {action}")));
    }
    let mut lines = vec![Line::from(spans)];
    if let Some(status) = status {
        lines.insert(0, Line::styled(status.to_string(), theme.error_style()));
    }

    let block = Block::default().borders(Borders::TOP);
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
