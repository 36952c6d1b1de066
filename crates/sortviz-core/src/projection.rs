//! Projected runtime curves from a single-point prediction.
//!
//! The curve is `runtime(n) = runtime(n0) * (n / n0) ^ exponent`, with the
//! exponent looked up by complexity class. It is a display aid, not a bound.

use std::collections::HashMap;

use crate::constants::{
    DEFAULT_PROJECTION_EXPONENT, PROJECTION_REFERENCE_N, PROJECTION_SAMPLE_SIZES,
};
use crate::error::VizError;
use crate::model::PredictionResult;

/// Growth exponent per complexity-class label.
#[derive(Debug, Clone)]
pub struct ExponentTable {
    exponents: HashMap<String, f64>,
    fallback: f64,
}

impl ExponentTable {
    /// Empty table; every class uses `fallback`.
    #[must_use]
    pub fn empty(fallback: f64) -> Self {
        Self {
            exponents: HashMap::new(),
            fallback,
        }
    }

    /// Add or replace the exponent for `class`.
    #[must_use]
    pub fn with(mut self, class: impl Into<String>, exponent: f64) -> Self {
        self.insert(class, exponent);
        self
    }

    pub fn insert(&mut self, class: impl Into<String>, exponent: f64) {
        self.exponents.insert(class.into(), exponent);
    }

    /// Exponent for `class`, or the fallback.
    #[must_use]
    pub fn exponent(&self, class: &str) -> f64 {
        self.exponents.get(class).copied().unwrap_or(self.fallback)
    }

    /// Whether `class` has its own entry.
    #[must_use]
    pub fn knows(&self, class: &str) -> bool {
        self.exponents.contains_key(class)
    }
}

impl Default for ExponentTable {
    fn default() -> Self {
        Self::empty(DEFAULT_PROJECTION_EXPONENT)
            .with("O(1)", 0.0)
            .with("O(n)", 1.0)
            .with("O(n log n)", 1.2)
            .with("O(n^2)", 2.0)
    }
}

/// One sample of a projected curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub n: u64,
    pub runtime_ms: f64,
}

/// Projected runtimes, strictly increasing in `n`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedCurve {
    pub points: Vec<ProjectedPoint>,
}

impl ProjectedCurve {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Projected runtime at exactly `n`, if sampled.
    #[must_use]
    pub fn at(&self, n: u64) -> Option<f64> {
        self.points.iter().find(|p| p.n == n).map(|p| p.runtime_ms)
    }

    /// Largest projected runtime.
    #[must_use]
    pub fn max_runtime(&self) -> Option<f64> {
        self.points.iter().map(|p| p.runtime_ms).reduce(f64::max)
    }
}

/// Maps a predicted class and runtime onto a curve over fixed sample sizes.
#[derive(Debug, Clone)]
pub struct PredictionProjector {
    table: ExponentTable,
    reference_n: u64,
    samples: Vec<u64>,
}

impl PredictionProjector {
    /// Projector with explicit reference size and samples.
    ///
    /// Samples are sorted and de-duplicated; zero sizes are rejected.
    pub fn new(table: ExponentTable, reference_n: u64, samples: &[u64]) -> Result<Self, VizError> {
        if reference_n == 0 {
            return Err(VizError::Validation("reference size must be positive".into()));
        }
        if samples.contains(&0) {
            return Err(VizError::Validation("sample sizes must be positive".into()));
        }
        let mut samples = samples.to_vec();
        samples.sort_unstable();
        samples.dedup();
        Ok(Self {
            table,
            reference_n,
            samples,
        })
    }

    #[must_use]
    pub fn table(&self) -> &ExponentTable {
        &self.table
    }

    #[must_use]
    pub fn reference_n(&self) -> u64 {
        self.reference_n
    }

    #[must_use]
    pub fn samples(&self) -> &[u64] {
        &self.samples
    }

    /// Project `runtime_ms`, measured at the reference size, for `class`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn project(&self, class: &str, runtime_ms: f64) -> ProjectedCurve {
        let exponent = self.table.exponent(class);
        let n0 = self.reference_n as f64;
        let points = self
            .samples
            .iter()
            .map(|&n| ProjectedPoint {
                n,
                runtime_ms: runtime_ms * (n as f64 / n0).powf(exponent),
            })
            .collect();
        ProjectedCurve { points }
    }

    /// Project a prediction using its reported class.
    #[must_use]
    pub fn project_prediction(&self, prediction: &PredictionResult) -> ProjectedCurve {
        self.project(&prediction.predicted_class, prediction.predicted_runtime_ms)
    }
}

impl Default for PredictionProjector {
    fn default() -> Self {
        Self {
            table: ExponentTable::default(),
            reference_n: PROJECTION_REFERENCE_N,
            samples: PROJECTION_SAMPLE_SIZES.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_doubles_to_four_times() {
        let projector = PredictionProjector::new(ExponentTable::default(), 500, &[500, 1000]).unwrap();
        let curve = projector.project("O(n^2)", 10.0);
        assert_eq!(curve.at(500), Some(10.0));
        assert!((curve.at(1000).unwrap() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn reference_point_is_exact() {
        let projector = PredictionProjector::new(ExponentTable::default(), 500, &[100, 500, 3200]).unwrap();
        for class in ["O(n)", "O(n log n)", "O(n^2)", "O(1)", "mystery"] {
            let value = 0.123_456_789;
            assert_eq!(projector.project(class, value).at(500), Some(value));
        }
    }

    #[test]
    fn unknown_class_is_linear() {
        let projector = PredictionProjector::default();
        let curve = projector.project("O(n!)", 5.0);
        assert!((curve.at(1600).unwrap() - 16.0).abs() < 1e-9);
        assert!(!projector.table().knows("O(n!)"));
    }

    #[test]
    fn log_linear_exponent() {
        let projector = PredictionProjector::default();
        let curve = projector.project("O(n log n)", 1.0);
        let expected = (3200.0f64 / 500.0).powf(1.2);
        assert!((curve.at(3200).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn table_is_extensible() {
        let table = ExponentTable::default().with("O(n^3)", 3.0);
        let projector = PredictionProjector::new(table, 10, &[20]).unwrap();
        assert!((projector.project("O(n^3)", 1.0).at(20).unwrap() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn samples_sorted_and_deduplicated() {
        let projector =
            PredictionProjector::new(ExponentTable::default(), 500, &[800, 100, 400, 100]).unwrap();
        assert_eq!(projector.samples(), &[100, 400, 800]);
        let curve = projector.project("O(n)", 1.0);
        assert!(curve.points.windows(2).all(|w| w[0].n < w[1].n));
    }

    #[test]
    fn zero_sizes_rejected() {
        assert!(PredictionProjector::new(ExponentTable::default(), 0, &[1]).is_err());
        assert!(PredictionProjector::new(ExponentTable::default(), 500, &[0, 10]).is_err());
    }

    #[test]
    fn default_samples() {
        let curve = PredictionProjector::default().project("O(n)", 1.0);
        assert_eq!(curve.len(), 6);
        assert_eq!(curve.points[0].n, 100);
        assert!((curve.max_runtime().unwrap() - 6.4).abs() < 1e-9);
    }

    #[test]
    fn constant_class_is_flat() {
        let curve = PredictionProjector::default().project("O(1)", 2.5);
        assert!(curve.points.iter().all(|p| (p.runtime_ms - 2.5).abs() < f64::EPSILON));
    }
}
