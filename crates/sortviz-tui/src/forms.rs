//! Run and prediction form state.

use sortviz_core::constants::{
    ARRAY_SIZE_STEP, DEFAULT_ALGORITHM, DEFAULT_ARRAY_SIZE, DEFAULT_PREDICT_SIZE, DEFAULT_SPEED,
    MAX_PREDICT_SIZE, MIN_PREDICT_SIZE, SPEED_STEP,
};
use sortviz_core::model::{Distribution, PredictRequest, RunRequest};
use sortviz_core::validation::{clamp_speed, SizeLimits};

/// Algorithm after (or before, when `forward` is false) `current` in
/// `names`, wrapping around. Unknown names start from the first entry.
#[must_use]
pub fn cycle_name(names: &[String], current: &str, forward: bool) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    let next = match names.iter().position(|n| n == current) {
        Some(i) if forward => (i + 1) % names.len(),
        Some(i) => (i + names.len() - 1) % names.len(),
        None => 0,
    };
    Some(names[next].clone())
}

/// Visualizer controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunForm {
    pub algorithm: String,
    pub size: usize,
    pub distribution: Distribution,
    pub speed: u32,
}

impl Default for RunForm {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM.to_string(),
            size: DEFAULT_ARRAY_SIZE,
            distribution: Distribution::default(),
            speed: DEFAULT_SPEED,
        }
    }
}

impl RunForm {
    /// Form with out-of-range values pulled back into range.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.size = SizeLimits::RUN_FORM.clamp(self.size);
        self.speed = clamp_speed(self.speed);
        self
    }

    /// Step the array size; returns whether it changed.
    pub fn step_size(&mut self, up: bool) -> bool {
        let next = if up {
            self.size.saturating_add(ARRAY_SIZE_STEP)
        } else {
            self.size.saturating_sub(ARRAY_SIZE_STEP)
        };
        let next = SizeLimits::RUN_FORM.clamp(next);
        let changed = next != self.size;
        self.size = next;
        changed
    }

    /// Step the speed; returns whether it changed.
    pub fn step_speed(&mut self, up: bool) -> bool {
        let next = if up {
            self.speed.saturating_add(SPEED_STEP)
        } else {
            self.speed.saturating_sub(SPEED_STEP)
        };
        let next = clamp_speed(next);
        let changed = next != self.speed;
        self.speed = next;
        changed
    }

    #[must_use]
    pub fn request(&self) -> RunRequest {
        RunRequest::recorded(self.algorithm.as_str(), self.size, self.distribution)
    }
}

/// Predictor controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictForm {
    pub algorithm: String,
    pub n: u64,
    pub distribution: Distribution,
}

impl Default for PredictForm {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM.to_string(),
            n: DEFAULT_PREDICT_SIZE,
            distribution: Distribution::default(),
        }
    }
}

impl PredictForm {
    /// Double or halve `n` within the accepted range; returns whether it
    /// changed.
    pub fn step_n(&mut self, up: bool) -> bool {
        let next = if up {
            self.n.saturating_mul(2)
        } else {
            self.n / 2
        };
        let next = next.clamp(MIN_PREDICT_SIZE, MAX_PREDICT_SIZE);
        let changed = next != self.n;
        self.n = next;
        changed
    }

    #[must_use]
    pub fn request(&self) -> PredictRequest {
        PredictRequest {
            algorithm: self.algorithm.clone(),
            n: self.n,
            distribution: self.distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortviz_core::constants::{MAX_ARRAY_SIZE, MAX_SPEED, MIN_ARRAY_SIZE};

    fn names() -> Vec<String> {
        ["bubble_sort", "merge_sort", "quick_sort"]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let names = names();
        assert_eq!(cycle_name(&names, "quick_sort", true).as_deref(), Some("bubble_sort"));
        assert_eq!(cycle_name(&names, "bubble_sort", false).as_deref(), Some("quick_sort"));
        assert_eq!(cycle_name(&names, "merge_sort", true).as_deref(), Some("quick_sort"));
    }

    #[test]
    fn cycle_unknown_or_empty() {
        assert_eq!(cycle_name(&names(), "heap_sort", true).as_deref(), Some("bubble_sort"));
        assert_eq!(cycle_name(&[], "heap_sort", true), None);
    }

    #[test]
    fn size_steps_stay_in_range() {
        let mut form = RunForm {
            size: MAX_ARRAY_SIZE,
            ..RunForm::default()
        };
        assert!(!form.step_size(true));
        assert_eq!(form.size, MAX_ARRAY_SIZE);
        form.size = MIN_ARRAY_SIZE;
        assert!(!form.step_size(false));
        assert!(form.step_size(true));
        assert_eq!(form.size, MIN_ARRAY_SIZE + ARRAY_SIZE_STEP);
    }

    #[test]
    fn speed_steps_stay_in_range() {
        let mut form = RunForm {
            speed: MAX_SPEED,
            ..RunForm::default()
        };
        assert!(!form.step_speed(true));
        assert!(form.step_speed(false));
        assert_eq!(form.speed, MAX_SPEED - SPEED_STEP);
    }

    #[test]
    fn clamped_pulls_into_range() {
        let form = RunForm {
            size: 5000,
            speed: 0,
            ..RunForm::default()
        }
        .clamped();
        assert_eq!(form.size, MAX_ARRAY_SIZE);
        assert_eq!(form.speed, clamp_speed(0));
    }

    #[test]
    fn run_request_is_recorded() {
        let request = RunForm::default().request();
        assert!(request.record_steps);
        assert_eq!(request.size, DEFAULT_ARRAY_SIZE);
        assert!(request.array.is_none());
    }

    #[test]
    fn predict_n_doubles_and_halves() {
        let mut form = PredictForm::default();
        assert!(form.step_n(true));
        assert_eq!(form.n, DEFAULT_PREDICT_SIZE * 2);
        form.n = MIN_PREDICT_SIZE;
        assert!(!form.step_n(false));
        form.n = MAX_PREDICT_SIZE;
        assert!(!form.step_n(true));
    }
}
