//! Linear scales with "nice" bounds and round tick steps.
//!
//! Tick steps are 1, 2 or 5 times a power of ten, chosen the same way d3
//! does, so bounds and labels match what a browser chart would show.

/// Linear map from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value into the range.
    ///
    /// A degenerate domain maps everything to the middle of the range.
    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Extend the domain outward to round tick boundaries.
    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        let (mut d0, mut d1) = self.domain;
        if !d0.is_finite() || !d1.is_finite() || d1 <= d0 || count == 0 {
            return self;
        }
        let mut prev_step = None;
        for _ in 0..10 {
            let spec = TickSpec::new(d0, d1, count);
            if prev_step == Some(spec.step) || !spec.is_usable() {
                break;
            }
            (d0, d1) = spec.round_out(d0, d1);
            prev_step = Some(spec.step);
        }
        self.domain = (d0, d1);
        self
    }

    /// Round tick values covering the domain, roughly `count` of them.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        if !d0.is_finite() || !d1.is_finite() || count == 0 {
            return Vec::new();
        }
        if d0 == d1 {
            return vec![d0];
        }
        let (lo, hi) = if d0 < d1 { (d0, d1) } else { (d1, d0) };
        TickSpec::new(lo, hi, count).values(lo, hi, count)
    }
}

/// Tick step expressed either as a multiple (`step >= 1`) or a divisor of one.
///
/// Dividing by the inverse for fractional steps keeps values like 0.3 exact.
#[derive(Debug, Clone, Copy)]
struct TickSpec {
    step: f64,
    inverse: Option<f64>,
}

impl TickSpec {
    fn new(lo: f64, hi: f64, count: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let raw = (hi - lo) / count.max(1) as f64;
        let power = raw.log10().floor();
        let error = raw / 10f64.powf(power);
        let factor = step_factor(error);
        if power >= 0.0 {
            Self {
                step: factor * 10f64.powf(power),
                inverse: None,
            }
        } else {
            let inverse = 10f64.powf(-power) / factor;
            Self {
                step: 1.0 / inverse,
                inverse: Some(inverse),
            }
        }
    }

    fn round_out(self, lo: f64, hi: f64) -> (f64, f64) {
        match self.inverse {
            None => (
                (lo / self.step).floor() * self.step,
                (hi / self.step).ceil() * self.step,
            ),
            Some(inv) => ((lo * inv).floor() / inv, (hi * inv).ceil() / inv),
        }
    }

    /// Step usable for rounding; zero or non-finite for spans too small or large.
    fn is_usable(self) -> bool {
        self.step.is_finite()
            && self.step > 0.0
            && self.inverse.map_or(true, |inv| inv.is_finite() && inv > 0.0)
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn values(self, lo: f64, hi: f64, count: usize) -> Vec<f64> {
        if !self.is_usable() {
            return Vec::new();
        }
        let (first, last) = match self.inverse {
            None => ((lo / self.step).ceil(), (hi / self.step).floor()),
            Some(inv) => ((lo * inv).ceil(), (hi * inv).floor()),
        };
        if !first.is_finite()
            || !last.is_finite()
            || first.abs() > MAX_EXACT_INDEX
            || last.abs() > MAX_EXACT_INDEX
            || last < first
            || last - first > (count * MAX_TICKS_PER_REQUESTED) as f64
        {
            return Vec::new();
        }
        let n = (last - first) as usize;
        (0..=n)
            .map(|k| {
                let i = first + k as f64;
                match self.inverse {
                    None => i * self.step,
                    Some(inv) => i / inv,
                }
            })
            .collect()
    }
}

/// Tick indices beyond this lose integer precision in an `f64`.
const MAX_EXACT_INDEX: f64 = 9_007_199_254_740_992.0;

/// Upper bound on ticks produced per requested tick.
const MAX_TICKS_PER_REQUESTED: usize = 10;

fn step_factor(error: f64) -> f64 {
    if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    }
}

/// Step between round ticks for a domain and approximate tick count.
#[must_use]
pub fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    TickSpec::new(lo, hi, count).step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_linearly() {
        let s = LinearScale::new((0.0, 100.0), (40.0, 490.0));
        assert!((s.map(0.0) - 40.0).abs() < 1e-9);
        assert!((s.map(100.0) - 490.0).abs() < 1e-9);
        assert!((s.map(50.0) - 265.0).abs() < 1e-9);
    }

    #[test]
    fn inverted_range_for_y_axis() {
        let s = LinearScale::new((0.0, 10.0), (170.0, 10.0));
        assert!((s.map(0.0) - 170.0).abs() < 1e-9);
        assert!((s.map(10.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_maps_to_middle() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert!((s.map(5.0) - 50.0).abs() < 1e-9);
        assert_eq!(s.ticks(5), vec![5.0]);
    }

    #[test]
    fn nice_rounds_outward() {
        let s = LinearScale::new((0.0, 37.3), (0.0, 1.0)).nice(4);
        assert_eq!(s.domain(), (0.0, 40.0));

        let s = LinearScale::new((0.0, 0.87), (0.0, 1.0)).nice(4);
        assert_eq!(s.domain(), (0.0, 1.0));

        let s = LinearScale::new((0.0, 0.87), (0.0, 1.0)).nice(10);
        assert_eq!(s.domain(), (0.0, 0.9));
    }

    #[test]
    fn nice_leaves_round_domain() {
        let s = LinearScale::new((0.0, 100.0), (0.0, 1.0)).nice(4);
        assert_eq!(s.domain(), (0.0, 100.0));
    }

    #[test]
    fn tick_steps_are_1_2_5() {
        assert!((tick_step(0.0, 10.0, 5) - 2.0).abs() < 1e-12);
        assert!((tick_step(0.0, 100.0, 4) - 20.0).abs() < 1e-12);
        assert!((tick_step(100.0, 3200.0, 5) - 500.0).abs() < 1e-12);
        assert!((tick_step(0.0, 1.0, 10) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn fractional_ticks_are_exact() {
        let s = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        let ticks = s.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
    }

    #[test]
    fn ticks_within_domain() {
        let s = LinearScale::new((100.0, 3200.0), (0.0, 1.0));
        assert_eq!(s.ticks(5), vec![500.0, 1000.0, 1500.0, 2000.0, 2500.0, 3000.0]);
    }

    #[test]
    fn extreme_spans_yield_no_ticks() {
        assert!(LinearScale::new((0.0, 5e-324), (0.0, 100.0)).ticks(5).is_empty());
        assert!(LinearScale::new((-1e308, 1e308), (0.0, 100.0)).ticks(5).is_empty());
        let s = LinearScale::new((0.0, 5e-324), (0.0, 100.0)).nice(5);
        assert_eq!(s.domain(), (0.0, 5e-324));
    }

    #[test]
    fn large_offset_small_span_stays_bounded() {
        let ticks = LinearScale::new((1e17, 1e17 + 64.0), (0.0, 1.0)).ticks(5);
        assert!(ticks.len() <= 50);
    }

    #[test]
    fn no_ticks_for_zero_count() {
        let s = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        assert!(s.ticks(0).is_empty());
    }
}
