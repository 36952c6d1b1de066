//! Drawing primitives and the surface they are emitted onto.

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Point in surface coordinates; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One drawable element.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Axis baseline from `from` to `to`.
    AxisLine {
        orientation: Orientation,
        from: Point2,
        to: Point2,
    },
    /// Tick mark anchored on an axis, with its label.
    Tick {
        orientation: Orientation,
        at: Point2,
        label: String,
    },
    /// Data point, optionally tagged with its series key.
    Circle {
        center: Point2,
        radius: f64,
        color: Rgb,
        key: Option<String>,
    },
    Polyline {
        points: Vec<Point2>,
        color: Rgb,
        width: f64,
    },
    /// Filled rectangle; `origin` is the top-left corner.
    Rect {
        origin: Point2,
        width: f64,
        height: f64,
        color: Rgb,
    },
}

/// Target that chart primitives are drawn onto.
///
/// Renderers call `clear` before emitting, so a surface only ever shows the
/// latest dataset.
pub trait ChartSurface {
    /// Remove everything previously drawn.
    fn clear(&mut self);

    fn draw(&mut self, primitive: Primitive);
}

/// Surface that keeps what it was given; used by tests and text front-ends.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    primitives: Vec<Primitive>,
    clears: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Number of `clear` calls seen.
    #[must_use]
    pub fn clears(&self) -> usize {
        self.clears
    }

    #[must_use]
    pub fn circle_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Circle { .. }))
            .count()
    }

    #[must_use]
    pub fn axis_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::AxisLine { .. }))
            .count()
    }

    /// Labels of ticks on the given axis, in emission order.
    #[must_use]
    pub fn tick_labels(&self, orientation: Orientation) -> Vec<&str> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Tick {
                    orientation: o,
                    label,
                    ..
                } if *o == orientation => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ChartSurface for RecordingSurface {
    fn clear(&mut self) {
        self.primitives.clear();
        self.clears += 1;
    }

    fn draw(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }
}
