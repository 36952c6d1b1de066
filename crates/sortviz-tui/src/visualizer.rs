//! Visualizer view: animated bars, run controls and playback status.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use sortviz_chart::format::format_ms;
use sortviz_chart::{render_bars, Rgb};
use sortviz_core::model::{AlgorithmDescriptor, RunMetrics};
use sortviz_core::playback::{PlaybackEngine, PlaybackState};
use sortviz_core::scheduler::TickScheduler;

use crate::forms::RunForm;
use crate::styles::ColorTheme;
use crate::surface::CanvasSurface;

/// Virtual canvas size the bars are laid out in.
const BAR_CANVAS: f64 = 100.0;

const BAR_COLOR: Rgb = Rgb(0x0e, 0xa5, 0xe9);

/// Render the current frame as vertical bars.
pub fn render_bars_panel(frame: &mut Frame, area: Rect, values: Option<&[i64]>) {
    let theme = ColorTheme::default();
    let mut surface = CanvasSurface::new(BAR_CANVAS, BAR_CANVAS);
    let title = match values {
        Some(values) => {
            render_bars(&mut surface, values, BAR_CANVAS, BAR_CANVAS, BAR_COLOR);
            format!(" Array ({} values) ", values.len())
        }
        None => " Array (press enter to run) ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.muted_style());
    surface.render(frame, area, block);
}

fn field(theme: &ColorTheme, name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{name:<13}"), theme.label_style()),
        Span::styled(value, theme.text_style()),
    ])
}

/// Render the run form together with the comparison selection.
pub fn render_controls(
    frame: &mut Frame,
    area: Rect,
    form: &RunForm,
    label: &str,
    running: bool,
    selection: &[String],
) {
    let theme = ColorTheme::default();
    let mut lines = vec![
        field(&theme, "Algorithm", label.to_string()),
        field(&theme, "Size", form.size.to_string()),
        field(&theme, "Distribution", form.distribution.label().to_string()),
        field(&theme, "Speed", form.speed.to_string()),
        field(
            &theme,
            "Compare",
            if selection.is_empty() {
                "-".to_string()
            } else {
                selection.join(", ")
            },
        ),
    ];
    if running {
        lines.push(Line::styled("Running…", theme.warning_style()));
    }
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Controls ")
            .border_style(theme.muted_style()),
    );
    frame.render_widget(paragraph, area);
}

/// Render complexity classes and description of the selected algorithm.
pub fn render_algorithm_info(
    frame: &mut Frame,
    area: Rect,
    descriptor: Option<&AlgorithmDescriptor>,
) {
    let theme = ColorTheme::default();
    let (title, lines) = match descriptor {
        Some(d) => (
            format!(" {} ", d.label),
            vec![
                field(&theme, "Best", d.best.clone()),
                field(&theme, "Average", d.average.clone()),
                field(&theme, "Worst", d.worst.clone()),
                field(&theme, "Space", d.space.clone()),
                Line::styled(d.description.clone(), theme.muted_style()),
            ],
        ),
        None => (
            " Algorithm ".to_string(),
            vec![Line::styled("Catalog not loaded", theme.muted_style())],
        ),
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(theme.muted_style()),
        );
    frame.render_widget(paragraph, area);
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "idle",
        PlaybackState::Playing => "playing",
        PlaybackState::Paused => "paused",
        PlaybackState::Finished => "finished",
    }
}

/// Render playback progress as a gauge.
pub fn render_playback<S: TickScheduler>(
    frame: &mut Frame,
    area: Rect,
    engine: &PlaybackEngine<S>,
) {
    let theme = ColorTheme::default();
    let label = if engine.frame_count() == 0 {
        state_label(engine.state()).to_string()
    } else {
        format!(
            "{} {}/{} @ {} ({} ms/step)",
            state_label(engine.state()),
            engine.frame() + 1,
            engine.frame_count(),
            engine.speed(),
            engine.interval().as_millis()
        )
    };
    let color = theme.playback_color(engine.state());
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Playback ")
                .border_style(theme.muted_style()),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(engine.progress().clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, area);
}

/// Render end metrics of the last run.
pub fn render_run_metrics(frame: &mut Frame, area: Rect, metrics: Option<&RunMetrics>) {
    let theme = ColorTheme::default();
    let lines = match metrics {
        Some(m) => vec![
            field(&theme, "Runtime", format_ms(m.runtime_ms)),
            field(&theme, "Comparisons", m.comparisons.to_string()),
            field(&theme, "Swaps", m.swaps.to_string()),
            field(&theme, "n", m.n.to_string()),
        ],
        None => vec![Line::styled("No run yet", theme.muted_style())],
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Metrics ")
            .border_style(theme.muted_style()),
    );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;
    use sortviz_core::scheduler::DeadlineScheduler;
    use std::time::Instant;

    fn draw<F>(width: u16, height: u16, f: F) -> Buffer
    where
        F: FnOnce(&mut Frame),
    {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| f(frame))
            .unwrap()
            .buffer
            .clone()
    }

    fn text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn controls_show_form() {
        let form = RunForm::default();
        let buf = draw(60, 10, |frame| {
            let area = frame.area();
            render_controls(frame, area, &form, "Quick Sort", true, &["merge_sort".to_string()]);
        });
        let content = text(&buf);
        assert!(content.contains("Quick Sort"));
        assert!(content.contains("40"));
        assert!(content.contains("merge_sort"));
        assert!(content.contains("Running"));
    }

    #[test]
    fn algorithm_info_lists_complexity() {
        let descriptor = AlgorithmDescriptor {
            name: "heap_sort".into(),
            label: "Heap Sort".into(),
            best: "O(n log n)".into(),
            average: "O(n log n)".into(),
            worst: "O(n log n)".into(),
            space: "O(1)".into(),
            description: "Builds a max-heap and extracts the maximum repeatedly.".into(),
        };
        let buf = draw(50, 9, |frame| {
            let area = frame.area();
            render_algorithm_info(frame, area, Some(&descriptor));
        });
        let content = text(&buf);
        assert!(content.contains("Heap Sort"));
        assert!(content.contains("Worst"));
        assert!(content.contains("O(1)"));
        assert!(content.contains("max-heap"));

        let buf = draw(40, 4, |frame| {
            let area = frame.area();
            render_algorithm_info(frame, area, None);
        });
        assert!(text(&buf).contains("Catalog not loaded"));
    }

    #[test]
    fn idle_playback_gauge() {
        let engine = PlaybackEngine::new(DeadlineScheduler::new(Instant::now()), 40).unwrap();
        let buf = draw(50, 3, |frame| {
            let area = frame.area();
            render_playback(frame, area, &engine);
        });
        assert!(text(&buf).contains("idle"));
    }

    #[test]
    fn metrics_panel() {
        let metrics = RunMetrics {
            algorithm: "merge_sort".into(),
            n: 40,
            distribution: "random".into(),
            runtime_ms: 0.5,
            comparisons: 171,
            swaps: 0,
        };
        let buf = draw(40, 6, |frame| {
            let area = frame.area();
            render_run_metrics(frame, area, Some(&metrics));
        });
        let content = text(&buf);
        assert!(content.contains("0.50 ms"));
        assert!(content.contains("171"));
    }

    #[test]
    fn bars_panel_with_and_without_values() {
        let buf = draw(40, 10, |frame| {
            let area = frame.area();
            render_bars_panel(frame, area, None);
        });
        assert!(text(&buf).contains("press enter"));
        let buf = draw(40, 10, |frame| {
            let area = frame.area();
            render_bars_panel(frame, area, Some(&[3, 1, 2]));
        });
        assert!(text(&buf).contains("3 values"));
    }
}
