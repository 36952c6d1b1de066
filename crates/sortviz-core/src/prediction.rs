//! Interpretation of a prediction response.

use crate::constants::PROBABILITY_TOLERANCE;
use crate::error::VizError;
use crate::model::PredictionResult;

/// Most probable complexity class and its probability.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassConfidence {
    pub label: String,
    pub probability: f64,
}

impl ClassConfidence {
    /// Probability as a percentage.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.probability * 100.0
    }
}

impl PredictionResult {
    /// Label with the highest probability.
    ///
    /// Ties go to the lexicographically first label; `None` when the map is
    /// empty.
    #[must_use]
    pub fn top_class(&self) -> Option<ClassConfidence> {
        let mut best: Option<(&String, f64)> = None;
        for (label, &p) in &self.class_probabilities {
            if best.map_or(true, |(_, bp)| p > bp) {
                best = Some((label, p));
            }
        }
        best.map(|(label, probability)| ClassConfidence {
            label: label.clone(),
            probability,
        })
    }

    /// Sum of all class probabilities.
    #[must_use]
    pub fn probability_mass(&self) -> f64 {
        self.class_probabilities.values().sum()
    }

    /// Check probabilities lie in [0, 1] and sum to 1 within tolerance.
    pub fn validate(&self) -> Result<(), VizError> {
        if let Some((label, p)) = self
            .class_probabilities
            .iter()
            .find(|(_, p)| !(0.0..=1.0).contains(*p))
        {
            return Err(VizError::Validation(format!(
                "probability {p} for {label} outside [0, 1]"
            )));
        }
        let mass = self.probability_mass();
        if (mass - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(VizError::Validation(format!(
                "class probabilities sum to {mass:.4}"
            )));
        }
        if !self.predicted_runtime_ms.is_finite() || self.predicted_runtime_ms < 0.0 {
            return Err(VizError::Validation(format!(
                "predicted runtime {} is not a valid duration",
                self.predicted_runtime_ms
            )));
        }
        Ok(())
    }
}
