//! Wire and session data model.
//!
//! Field names follow the backend's JSON (snake_case), so every type here
//! round-trips through `serde_json` unchanged.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// Static description of one sorting algorithm offered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmDescriptor {
    /// Stable identifier, e.g. `merge_sort`.
    pub name: String,
    /// Display label, e.g. `Merge Sort`.
    pub label: String,
    /// Best-case time complexity.
    pub best: String,
    /// Average-case time complexity.
    pub average: String,
    /// Worst-case time complexity.
    pub worst: String,
    /// Auxiliary space complexity.
    pub space: String,
    /// One-paragraph description.
    pub description: String,
}

/// Generator policy for the input array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    #[default]
    Random,
    Sorted,
    Reverse,
    NearlySorted,
    ManyDuplicates,
}

impl Distribution {
    /// All distributions in form order.
    pub const ALL: [Distribution; 5] = [
        Distribution::Random,
        Distribution::Sorted,
        Distribution::Reverse,
        Distribution::NearlySorted,
        Distribution::ManyDuplicates,
    ];

    /// Wire identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Sorted => "sorted",
            Self::Reverse => "reverse",
            Self::NearlySorted => "nearly_sorted",
            Self::ManyDuplicates => "many_duplicates",
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::Sorted => "Sorted",
            Self::Reverse => "Reverse sorted",
            Self::NearlySorted => "Nearly sorted",
            Self::ManyDuplicates => "Many duplicates",
        }
    }

    /// Next distribution in form order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distribution {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| VizError::Validation(format!("unknown distribution: {s}")))
    }
}

/// Body of `POST /api/run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub algorithm: String,
    pub size: usize,
    pub distribution: Distribution,
    pub record_steps: bool,
    /// Explicit input array; the backend generates one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<Vec<i64>>,
}

impl RunRequest {
    /// Request a recorded run suitable for playback.
    pub fn recorded(algorithm: impl Into<String>, size: usize, distribution: Distribution) -> Self {
        Self {
            algorithm: algorithm.into(),
            size,
            distribution,
            record_steps: true,
            array: None,
        }
    }

    /// Request a metrics-only run (no trace).
    pub fn metrics_only(
        algorithm: impl Into<String>,
        size: usize,
        distribution: Distribution,
    ) -> Self {
        Self {
            record_steps: false,
            ..Self::recorded(algorithm, size, distribution)
        }
    }

    /// Attach an explicit input array.
    #[must_use]
    pub fn with_array(mut self, array: Vec<i64>) -> Self {
        self.array = Some(array);
        self
    }
}

/// End metrics of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub algorithm: String,
    pub n: usize,
    pub distribution: String,
    pub runtime_ms: f64,
    pub comparisons: u64,
    pub swaps: u64,
}

/// Response of `POST /api/run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub sorted: Vec<i64>,
    pub metrics: RunMetrics,
    #[serde(default)]
    pub steps: Vec<Vec<i64>>,
}

impl RunResult {
    /// Whether the run carries a trace that can be played back.
    #[must_use]
    pub fn has_trace(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Number of recorded frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.steps.len()
    }

    /// Snapshot at `index`, if recorded.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&[i64]> {
        self.steps.get(index).map(Vec::as_slice)
    }
}

/// Persisted historical run, owned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: u64,
    pub algorithm: String,
    pub n: usize,
    pub distribution: String,
    pub runtime_ms: f64,
    pub comparisons: u64,
    pub swaps: u64,
    pub created_at: String,
}

impl RunRecord {
    /// Time-of-day part of the timestamp (`HH:MM:SS`), or the raw value.
    #[must_use]
    pub fn time_of_day(&self) -> &str {
        let time = self
            .created_at
            .split_once('T')
            .map_or(self.created_at.as_str(), |(_, t)| t);
        time.get(..8).unwrap_or(time)
    }
}

/// Filters accepted by `GET /api/runs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub algorithm: Option<String>,
    pub min_n: Option<usize>,
    pub max_n: Option<usize>,
    pub limit: Option<u32>,
}

impl HistoryQuery {
    /// Query restricted to one algorithm.
    pub fn for_algorithm(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: Some(algorithm.into()),
            ..Self::default()
        }
    }

    /// Query-string pairs, omitting unset filters.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(algorithm) = &self.algorithm {
            pairs.push(("algorithm", algorithm.clone()));
        }
        if let Some(min_n) = self.min_n {
            pairs.push(("min_n", min_n.to_string()));
        }
        if let Some(max_n) = self.max_n {
            pairs.push(("max_n", max_n.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Body of `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub algorithm: String,
    pub n: u64,
    pub distribution: Distribution,
}

/// Response of `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_class: String,
    pub class_probabilities: BTreeMap<String, f64>,
    pub predicted_runtime_ms: f64,
}

/// Response of `POST /api/train`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    pub status: String,
    pub trained_on_samples: u64,
    pub accuracy: f64,
    pub runtime_mae_ms: f64,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
