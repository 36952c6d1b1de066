//! Range checks for user-supplied form values.

use crate::constants::{
    MAX_ARRAY_SIZE, MAX_PREDICT_SIZE, MAX_SPEED, MIN_ARRAY_SIZE, MIN_PREDICT_SIZE, MIN_SPEED,
};
use crate::error::VizError;

/// Inclusive bounds for an input size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    pub min: usize,
    pub max: usize,
}

impl SizeLimits {
    /// Limits of the visualizer and comparison forms.
    pub const RUN_FORM: SizeLimits = SizeLimits {
        min: MIN_ARRAY_SIZE,
        max: MAX_ARRAY_SIZE,
    };

    pub fn check(&self, size: usize) -> Result<usize, VizError> {
        if (self.min..=self.max).contains(&size) {
            Ok(size)
        } else {
            Err(VizError::Validation(format!(
                "array size {size} outside {}..={}",
                self.min, self.max
            )))
        }
    }

    /// Clamp into range; used by the +/- controls.
    #[must_use]
    pub fn clamp(&self, size: usize) -> usize {
        size.clamp(self.min, self.max)
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::RUN_FORM
    }
}

/// Animation speed must be positive.
pub fn check_speed(speed: u32) -> Result<u32, VizError> {
    if speed == 0 {
        Err(VizError::Validation("speed must be positive".into()))
    } else {
        Ok(speed)
    }
}

/// Clamp a speed into the range offered by the controls.
#[must_use]
pub fn clamp_speed(speed: u32) -> u32 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

/// Input size accepted by the prediction form.
pub fn check_predict_n(n: u64) -> Result<u64, VizError> {
    if (MIN_PREDICT_SIZE..=MAX_PREDICT_SIZE).contains(&n) {
        Ok(n)
    } else {
        Err(VizError::Validation(format!(
            "n = {n} outside {MIN_PREDICT_SIZE}..={MAX_PREDICT_SIZE}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_form_bounds() {
        let limits = SizeLimits::RUN_FORM;
        assert!(limits.check(10).is_ok());
        assert!(limits.check(200).is_ok());
        assert!(matches!(limits.check(9), Err(VizError::Validation(_))));
        assert!(matches!(limits.check(201), Err(VizError::Validation(_))));
        assert_eq!(limits.clamp(5), 10);
        assert_eq!(limits.clamp(1000), 200);
    }

    #[test]
    fn speed_checks() {
        assert!(check_speed(0).is_err());
        assert_eq!(check_speed(1).unwrap(), 1);
        assert_eq!(clamp_speed(0), MIN_SPEED);
        assert_eq!(clamp_speed(500), MAX_SPEED);
    }

    #[test]
    fn predict_bounds() {
        assert!(check_predict_n(1).is_err());
        assert!(check_predict_n(2).is_ok());
        assert!(check_predict_n(100_000).is_ok());
        assert!(check_predict_n(100_001).is_err());
    }
}
