//! Live array bars.

use crate::primitives::{ChartSurface, Point2, Primitive, Rgb};

/// One bar; `x` is its left edge, `height` grows up from the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub value: i64,
}

/// Equal-width bars spanning `width`, each `value / max` of `height` tall.
///
/// Negative values draw as empty bars; a non-positive maximum flattens all
/// of them.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bar_geometry(values: &[i64], width: f64, height: f64) -> Vec<Bar> {
    if values.is_empty() {
        return Vec::new();
    }
    let max = values.iter().copied().max().unwrap_or(0);
    let bar_width = width / values.len() as f64;
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let ratio = if max > 0 {
                (value.max(0) as f64 / max as f64).clamp(0.0, 1.0)
            } else {
                0.0
            };
            Bar {
                x: i as f64 * bar_width,
                width: bar_width,
                height: ratio * height,
                value,
            }
        })
        .collect()
}

/// Clear `surface` and draw bars bottom-aligned in a `width` × `height` box.
pub fn render_bars<S: ChartSurface + ?Sized>(
    surface: &mut S,
    values: &[i64],
    width: f64,
    height: f64,
    color: Rgb,
) -> usize {
    surface.clear();
    let bars = bar_geometry(values, width, height);
    for bar in &bars {
        surface.draw(Primitive::Rect {
            origin: Point2::new(bar.x, height - bar.height),
            width: bar.width,
            height: bar.height,
            color,
        });
    }
    bars.len()
}
