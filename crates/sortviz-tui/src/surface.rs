//! Canvas-backed chart surface.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line as TextLine;
use ratatui::widgets::canvas::{Canvas, Context, Line, Points};
use ratatui::widgets::Block;
use ratatui::Frame;

use sortviz_chart::{ChartSurface, Orientation, Primitive};

use crate::styles::to_color;

/// Collects chart primitives and paints them onto a ratatui canvas.
///
/// Chart coordinates grow downward; the canvas grows upward, so y is flipped
/// against `height`.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    width: f64,
    height: f64,
    primitives: Vec<Primitive>,
}

impl CanvasSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            primitives: Vec::new(),
        }
    }

    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }

    fn paint(&self, ctx: &mut Context<'_>) {
        for primitive in &self.primitives {
            match primitive {
                Primitive::AxisLine { from, to, .. } => ctx.draw(&Line::new(
                    from.x,
                    self.flip(from.y),
                    to.x,
                    self.flip(to.y),
                    Color::Gray,
                )),
                Primitive::Tick {
                    orientation,
                    at,
                    label,
                } => {
                    let y = self.flip(at.y);
                    let (x, y) = match orientation {
                        Orientation::Horizontal => (at.x, y - self.height * 0.08),
                        Orientation::Vertical => (at.x - self.width * 0.07, y),
                    };
                    ctx.print(
                        x.max(0.0),
                        y.max(0.0),
                        TextLine::styled(label.clone(), Style::default().fg(Color::DarkGray)),
                    );
                }
                Primitive::Circle { center, color, .. } => ctx.draw(&Points {
                    coords: &[(center.x, self.flip(center.y))],
                    color: to_color(*color),
                }),
                Primitive::Polyline { points, color, .. } => {
                    for pair in points.windows(2) {
                        ctx.draw(&Line::new(
                            pair[0].x,
                            self.flip(pair[0].y),
                            pair[1].x,
                            self.flip(pair[1].y),
                            to_color(*color),
                        ));
                    }
                }
                Primitive::Rect {
                    origin,
                    width,
                    height,
                    color,
                } => {
                    if *height <= 0.0 {
                        continue;
                    }
                    let top = self.flip(origin.y);
                    let bottom = top - height;
                    let x = origin.x + width / 2.0;
                    ctx.draw(&Line::new(x, bottom, x, top, to_color(*color)));
                }
            }
        }
    }

    /// Render the collected primitives into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, block: Block<'_>) {
        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([0.0, self.width])
            .y_bounds([0.0, self.height])
            .paint(|ctx| self.paint(ctx));
        frame.render_widget(canvas, area);
    }
}

impl ChartSurface for CanvasSurface {
    fn clear(&mut self) {
        self.primitives.clear();
    }

    fn draw(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }
}
