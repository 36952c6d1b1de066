//! Predictor view: form, class probabilities, projected runtime curve.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

use sortviz_chart::format::format_ms;
use sortviz_chart::{ChartLayout, ChartMode, ChartRenderer, Dataset, Palette};
use sortviz_core::model::TrainReport;
use sortviz_orchestration::predictor::PredictionOutcome;

use crate::forms::PredictForm;
use crate::styles::ColorTheme;
use crate::surface::CanvasSurface;

/// Busy flags for the predictor view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredictorActivity {
    pub predicting: bool,
    pub training: bool,
}

/// Render the whole predictor view.
pub fn render_prediction(
    frame: &mut Frame,
    area: Rect,
    form: &PredictForm,
    label: &str,
    outcome: Option<&PredictionOutcome>,
    train: Option<&TrainReport>,
    activity: PredictorActivity,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(5)])
        .split(columns[0]);

    render_form(frame, left[0], form, label, train, activity);
    render_probabilities(frame, left[1], outcome);
    render_projection(frame, columns[1], outcome);
}

fn render_form(
    frame: &mut Frame,
    area: Rect,
    form: &PredictForm,
    label: &str,
    train: Option<&TrainReport>,
    activity: PredictorActivity,
) {
    let theme = ColorTheme::default();
    let field = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{name:<13}"), theme.label_style()),
            Span::raw(value),
        ])
    };
    let mut lines = vec![
        field("Algorithm", label.to_string()),
        field("n", form.n.to_string()),
        field("Distribution", form.distribution.label().to_string()),
    ];
    if activity.predicting {
        lines.push(Line::styled("Predicting…", theme.warning_style()));
    }
    if activity.training {
        lines.push(Line::styled("Training…", theme.warning_style()));
    } else if let Some(report) = train {
        lines.push(Line::styled(
            format!(
                "Model {}: {} samples, accuracy {:.1}%, MAE {}",
                report.status,
                report.trained_on_samples,
                report.accuracy * 100.0,
                format_ms(report.runtime_mae_ms)
            ),
            theme.success_style(),
        ));
    }
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Predict ")
            .border_style(theme.muted_style()),
    );
    frame.render_widget(paragraph, area);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn render_probabilities(frame: &mut Frame, area: Rect, outcome: Option<&PredictionOutcome>) {
    let theme = ColorTheme::default();
    let title = match outcome {
        Some(o) => format!(
            " {} ({:.1}%) · {} at n={} ",
            o.top.label,
            o.top.percent(),
            format_ms(o.result.predicted_runtime_ms),
            o.request.n
        ),
        None => " Complexity class ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.muted_style());
    let Some(outcome) = outcome else {
        let hint = Paragraph::new(Line::styled("Press enter to predict", theme.muted_style()))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let bars: Vec<Bar> = outcome
        .result
        .class_probabilities
        .iter()
        .map(|(class, p)| {
            let style = if *class == outcome.top.label {
                theme.selected_style()
            } else {
                theme.heading_style()
            };
            Bar::default()
                .label(Line::from(class.clone()))
                .value((p * 100.0).round() as u64)
                .text_value(format!("{:.0}%", p * 100.0))
                .style(style)
        })
        .collect();
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .max(100);
    frame.render_widget(chart, area);
}

fn render_projection(frame: &mut Frame, area: Rect, outcome: Option<&PredictionOutcome>) {
    let theme = ColorTheme::default();
    let layout = ChartLayout::projection();
    let mut surface = CanvasSurface::new(layout.width, layout.height);
    let dataset = outcome.map_or_else(Dataset::default, |o| Dataset::from_curve(&o.curve));
    ChartRenderer::new(layout, Palette::default()).render(&mut surface, &dataset, ChartMode::Line);
    let title = match outcome {
        Some(o) => format!(" Projected runtime ({}) ", o.top.label),
        None => " Projected runtime ".to_string(),
    };
    surface.render(
        frame,
        area,
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.muted_style()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use sortviz_core::model::PredictionResult;
    use sortviz_core::projection::PredictionProjector;

    fn outcome() -> PredictionOutcome {
        let form = PredictForm::default();
        let result = PredictionResult {
            predicted_class: "O(n log n)".into(),
            class_probabilities: [("O(n log n)".to_string(), 0.8), ("O(n^2)".to_string(), 0.2)]
                .into_iter()
                .collect(),
            predicted_runtime_ms: 4.2,
        };
        let top = result.top_class().unwrap();
        let curve = PredictionProjector::default().project(&top.label, result.predicted_runtime_ms);
        PredictionOutcome {
            request: form.request(),
            result,
            top,
            curve,
        }
    }

    fn screen(outcome: Option<&PredictionOutcome>, activity: PredictorActivity) -> String {
        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let form = PredictForm::default();
        let report = TrainReport {
            status: "trained".into(),
            trained_on_samples: 320,
            accuracy: 0.9,
            runtime_mae_ms: 0.25,
        };
        let buf = terminal
            .draw(|frame| {
                let area = frame.area();
                render_prediction(frame, area, &form, "Quick Sort", outcome, Some(&report), activity);
            })
            .unwrap();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf.buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn shows_top_class_and_report() {
        let o = outcome();
        let content = screen(Some(&o), PredictorActivity::default());
        assert!(content.contains("O(n log n) (80.0%)"));
        assert!(content.contains("4.20 ms"));
        assert!(content.contains("320 samples"));
        assert!(content.contains("Projected runtime (O(n log n))"));
    }

    #[test]
    fn hint_before_first_prediction() {
        let content = screen(
            None,
            PredictorActivity {
                predicting: true,
                training: true,
            },
        );
        assert!(content.contains("Press enter to predict"));
        assert!(content.contains("Predicting"));
        assert!(content.contains("Training"));
        assert!(!content.contains("320 samples"));
    }
}
