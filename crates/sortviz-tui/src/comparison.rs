//! Comparison results table.

use ratatui::layout::{Constraint, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use ratatui::Frame;

use sortviz_chart::format::format_ms;
use sortviz_orchestration::comparison::ComparisonSession;

use crate::styles::ColorTheme;

/// One table row per algorithm: runtime, counters, and a status cell.
fn rows<'a>(session: &'a ComparisonSession, label: &dyn Fn(&str) -> String) -> Vec<Row<'a>> {
    let theme = ColorTheme::default();
    session
        .algorithms()
        .iter()
        .map(|algorithm| {
            let is_winner = session.winner() == Some(algorithm.as_str());
            let name = if is_winner {
                format!("★ {}", label(algorithm))
            } else {
                format!("  {}", label(algorithm))
            };
            match session.result(algorithm) {
                None => Row::new(vec![
                    name,
                    "…".into(),
                    String::new(),
                    String::new(),
                    "pending".into(),
                ])
                .style(theme.muted_style()),
                Some(Ok(run)) => {
                    let style = if is_winner {
                        theme.selected_style()
                    } else {
                        theme.text_style()
                    };
                    Row::new(vec![
                        name,
                        format_ms(run.metrics.runtime_ms),
                        run.metrics.comparisons.to_string(),
                        run.metrics.swaps.to_string(),
                        "ok".into(),
                    ])
                    .style(style)
                }
                Some(Err(err)) => Row::new(vec![
                    name,
                    "-".into(),
                    String::new(),
                    String::new(),
                    err.to_string(),
                ])
                .style(theme.error_style()),
            }
        })
        .collect()
}

/// Render the live comparison, or a hint when none has been started.
pub fn render_comparison(
    frame: &mut Frame,
    area: Rect,
    session: Option<&ComparisonSession>,
    label: &dyn Fn(&str) -> String,
) {
    let theme = ColorTheme::default();
    let Some(session) = session else {
        let hint = Paragraph::new(Line::styled(
            "Select algorithms with m, then press c to compare",
            theme.muted_style(),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Comparison ")
                .border_style(theme.muted_style()),
        );
        frame.render_widget(hint, area);
        return;
    };

    let config = session.config();
    let mut title = format!(
        " Comparison {} · n={} · {} ",
        session.token(),
        config.size,
        config.distribution.label()
    );
    if !session.is_complete() {
        title.push_str(&format!("· {} pending ", session.pending().len()));
    }
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.muted_style());
    if let Some(caveat) = session.fidelity().caveat() {
        block = block.title_bottom(Line::styled(format!(" note: {caveat} "), theme.warning_style()));
    }

    let header = Row::new(vec!["Algorithm", "Runtime", "Comparisons", "Swaps", "Status"])
        .style(theme.heading_style());
    let table = Table::new(
        rows(session, label),
        [
            Constraint::Length(22),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Min(8),
        ],
    )
    .header(header)
    .block(block);
    frame.render_widget(table, area);
}
