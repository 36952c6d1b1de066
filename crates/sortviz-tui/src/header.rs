//! TUI header panel: view tabs and backend address.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::keymap::View;
use crate::styles::ColorTheme;

/// Render the header with the active view highlighted.
pub fn render_header(frame: &mut Frame, area: Rect, active: View, api_url: &str) {
    let theme = ColorTheme::default();
    let mut spans = vec![Span::styled("SortViz", theme.header_style()), Span::raw(" |")];
    for (i, view) in View::ALL.iter().enumerate() {
        let label = format!(" {}:{} ", i + 1, view.title());
        let style = if *view == active {
            theme.selected_style()
        } else {
            theme.muted_style()
        };
        spans.push(Span::styled(label, style));
    }
    spans.push(Span::raw("| "));
    spans.push(Span::styled(api_url.to_string(), theme.label_style()));

    let block = Block::default().borders(Borders::BOTTOM);
    let paragraph = Paragraph::new(vec![Line::from(spans)]).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn shows_tabs_and_url() {
        let backend = TestBackend::new(100, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        let buf = terminal
            .draw(|frame| {
                let area = frame.area();
                render_header(frame, area, View::Data, "http://localhost:8000");
            })
            .unwrap();
        let row: String = (0..buf.area.width)
            .map(|x| buf.buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(row.contains("1:Visualizer"));
        assert!(row.contains("2:Data Explorer"));
        assert!(row.contains("3:Predictor"));
        assert!(row.contains("localhost:8000"));
    }

    #[test]
    fn narrow_area_does_not_panic() {
        let backend = TestBackend::new(12, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_header(frame, area, View::Visualizer, "http://x");
            })
            .unwrap();
    }
}
