//! Dataset → chart geometry.
//!
//! Geometry is pure: the same dataset and layout always produce the same
//! primitives. [`ChartRenderer::render`] clears the surface first, so a
//! redraw never accumulates elements from an earlier dataset.

use sortviz_core::model::RunRecord;
use sortviz_core::projection::ProjectedCurve;

use crate::format::{format_plain, format_si};
use crate::palette::Palette;
use crate::primitives::{ChartSurface, Orientation, Point2, Primitive, Rgb};
use crate::scale::LinearScale;

/// Projection line colour.
pub const LINE_COLOR: Rgb = Rgb(0x38, 0xbd, 0xf8);

const POINT_RADIUS: f64 = 3.0;
const LINE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Chart size, margins and tick density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub x_ticks: usize,
    pub y_ticks: usize,
}

impl ChartLayout {
    /// Runtime-vs-size scatter of historical runs.
    #[must_use]
    pub fn history() -> Self {
        Self {
            width: 500.0,
            height: 200.0,
            margins: Margins {
                top: 10.0,
                right: 10.0,
                bottom: 30.0,
                left: 40.0,
            },
            x_ticks: 5,
            y_ticks: 4,
        }
    }

    /// Projected runtime curve.
    #[must_use]
    pub fn projection() -> Self {
        Self {
            width: 400.0,
            height: 180.0,
            margins: Margins {
                top: 10.0,
                right: 10.0,
                bottom: 25.0,
                left: 35.0,
            },
            x_ticks: 5,
            y_ticks: 4,
        }
    }

    /// Same margins and ticks, different size.
    #[must_use]
    pub fn resized(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn x_range(&self) -> (f64, f64) {
        (self.margins.left, self.width - self.margins.right)
    }

    fn y_range(&self) -> (f64, f64) {
        (self.height - self.margins.bottom, self.margins.top)
    }
}

/// One `(x, y)` sample with an optional series key.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    pub key: Option<String>,
}

/// Finite points to chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<DataPoint>,
}

impl Dataset {
    /// Build from raw points, dropping any with a non-finite coordinate.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = DataPoint>,
    {
        Self {
            points: points
                .into_iter()
                .filter(|p| p.x.is_finite() && p.y.is_finite())
                .collect(),
        }
    }

    /// Runtime against input size, keyed by algorithm.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_runs<'a, I>(runs: I) -> Self
    where
        I: IntoIterator<Item = &'a RunRecord>,
    {
        Self::from_points(runs.into_iter().map(|r| DataPoint {
            x: r.n as f64,
            y: r.runtime_ms,
            key: Some(r.algorithm.clone()),
        }))
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_curve(curve: &ProjectedCurve) -> Self {
        Self::from_points(curve.points.iter().map(|p| DataPoint {
            x: p.n as f64,
            y: p.runtime_ms,
            key: None,
        }))
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn x_extent(&self) -> Option<(f64, f64)> {
        let xs = self.points.iter().map(|p| p.x);
        let min = xs.clone().reduce(f64::min)?;
        let max = xs.reduce(f64::max)?;
        Some((min, max))
    }

    fn y_max(&self) -> f64 {
        self.points.iter().map(|p| p.y).fold(0.0, f64::max)
    }
}

/// How data points are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// One coloured circle per point.
    Scatter,
    /// Points joined in x order by a single polyline.
    Line,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub axes: Vec<Primitive>,
    pub ticks: Vec<Primitive>,
    pub marks: Vec<Primitive>,
}

impl ChartGeometry {
    fn empty(layout: &ChartLayout) -> Self {
        Self {
            x_scale: LinearScale::new((0.0, 1.0), layout.x_range()),
            y_scale: LinearScale::new((0.0, 1.0), layout.y_range()),
            axes: Vec::new(),
            ticks: Vec::new(),
            marks: Vec::new(),
        }
    }

    /// All primitives in drawing order: axes, ticks, then data marks.
    #[must_use]
    pub fn primitives(&self) -> Vec<Primitive> {
        self.axes
            .iter()
            .chain(&self.ticks)
            .chain(&self.marks)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty() && self.marks.is_empty()
    }
}

/// Stateless renderer for scatter and line charts.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    layout: ChartLayout,
    palette: Palette,
    line_color: Rgb,
}

impl ChartRenderer {
    #[must_use]
    pub fn new(layout: ChartLayout, palette: Palette) -> Self {
        Self {
            layout,
            palette,
            line_color: LINE_COLOR,
        }
    }

    #[must_use]
    pub fn with_line_color(mut self, color: Rgb) -> Self {
        self.line_color = color;
        self
    }

    #[must_use]
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Compute the chart for `dataset`. An empty dataset yields no axes and
    /// no marks.
    #[must_use]
    pub fn geometry(&self, dataset: &Dataset, mode: ChartMode) -> ChartGeometry {
        let layout = &self.layout;
        let Some(x_domain) = dataset.x_extent() else {
            return ChartGeometry::empty(layout);
        };
        let y_max = match dataset.y_max() {
            m if m > 0.0 => m,
            _ => 1.0,
        };
        let x_scale = LinearScale::new(x_domain, layout.x_range());
        let y_scale = LinearScale::new((0.0, y_max), layout.y_range()).nice(layout.y_ticks);

        let (x0, x1) = layout.x_range();
        let (y0, y1) = layout.y_range();
        let axes = vec![
            Primitive::AxisLine {
                orientation: Orientation::Horizontal,
                from: Point2::new(x0, y0),
                to: Point2::new(x1, y0),
            },
            Primitive::AxisLine {
                orientation: Orientation::Vertical,
                from: Point2::new(x0, y0),
                to: Point2::new(x0, y1),
            },
        ];

        let x_ticks = x_scale.ticks(layout.x_ticks).into_iter().map(|v| Primitive::Tick {
            orientation: Orientation::Horizontal,
            at: Point2::new(x_scale.map(v), y0),
            label: format_si(v),
        });
        let y_ticks = y_scale.ticks(layout.y_ticks).into_iter().map(|v| Primitive::Tick {
            orientation: Orientation::Vertical,
            at: Point2::new(x0, y_scale.map(v)),
            label: format_plain(v),
        });
        let ticks = x_ticks.chain(y_ticks).collect();

        let marks = match mode {
            ChartMode::Scatter => dataset
                .points()
                .iter()
                .map(|p| Primitive::Circle {
                    center: Point2::new(x_scale.map(p.x), y_scale.map(p.y)),
                    radius: POINT_RADIUS,
                    color: p
                        .key
                        .as_deref()
                        .map_or(self.line_color, |k| self.palette.color(k)),
                    key: p.key.clone(),
                })
                .collect(),
            ChartMode::Line => {
                let mut sorted: Vec<&DataPoint> = dataset.points().iter().collect();
                sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
                vec![Primitive::Polyline {
                    points: sorted
                        .into_iter()
                        .map(|p| Point2::new(x_scale.map(p.x), y_scale.map(p.y)))
                        .collect(),
                    color: self.line_color,
                    width: LINE_WIDTH,
                }]
            }
        };

        ChartGeometry {
            x_scale,
            y_scale,
            axes,
            ticks,
            marks,
        }
    }

    /// Clear `surface` and draw `dataset` onto it. Returns the number of
    /// primitives emitted.
    pub fn render<S: ChartSurface + ?Sized>(
        &self,
        surface: &mut S,
        dataset: &Dataset,
        mode: ChartMode,
    ) -> usize {
        surface.clear();
        let primitives = self.geometry(dataset, mode).primitives();
        let count = primitives.len();
        for primitive in primitives {
            surface.draw(primitive);
        }
        count
    }
}
