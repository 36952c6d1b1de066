//! Data explorer: runtime scatter and run table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Row, Table};
use ratatui::Frame;

use sortviz_chart::format::format_ms;
use sortviz_chart::{ChartLayout, ChartMode, ChartRenderer, Dataset, Palette};
use sortviz_core::model::RunRecord;
use sortviz_orchestration::history::HistoryFilter;

use crate::styles::{to_color, ColorTheme};
use crate::surface::CanvasSurface;

/// Render the history view; `runs` are already filtered.
pub fn render_history(
    frame: &mut Frame,
    area: Rect,
    runs: &[&RunRecord],
    filter: &HistoryFilter,
    palette: &Palette,
    loading: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let theme = ColorTheme::default();
    let filter_label = filter.algorithm().unwrap_or("all algorithms");
    let title = if loading {
        format!(" Runtime vs n · {filter_label} · loading… ")
    } else {
        format!(" Runtime vs n · {filter_label} · {} runs ", runs.len())
    };

    let layout = ChartLayout::history();
    let mut surface = CanvasSurface::new(layout.width, layout.height);
    ChartRenderer::new(layout, palette.clone()).render(
        &mut surface,
        &Dataset::from_runs(runs.iter().copied()),
        ChartMode::Scatter,
    );
    surface.render(
        frame,
        chunks[0],
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.muted_style()),
    );

    render_table(frame, chunks[1], runs, palette);
}

fn render_table(frame: &mut Frame, area: Rect, runs: &[&RunRecord], palette: &Palette) {
    let theme = ColorTheme::default();
    let header = Row::new(vec![
        "Time",
        "Algorithm",
        "n",
        "Distribution",
        "Runtime",
        "Comparisons",
        "Swaps",
    ])
    .style(theme.heading_style());
    let rows: Vec<Row> = runs
        .iter()
        .map(|run| {
            Row::new(vec![
                run.time_of_day().to_string(),
                run.algorithm.clone(),
                run.n.to_string(),
                run.distribution.clone(),
                format_ms(run.runtime_ms),
                run.comparisons.to_string(),
                run.swaps.to_string(),
            ])
            .style(Style::default().fg(to_color(palette.color(&run.algorithm))))
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(9),
            Constraint::Length(16),
            Constraint::Length(6),
            Constraint::Length(15),
            Constraint::Length(11),
            Constraint::Length(12),
            Constraint::Min(6),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Recent runs ")
            .border_style(theme.muted_style()),
    );
    frame.render_widget(table, area);
}
