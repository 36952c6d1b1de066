//! In-memory backend for tests and offline demos.

use std::collections::HashMap;

use parking_lot::Mutex;

use sortviz_core::model::{
    AlgorithmDescriptor, Distribution, HealthStatus, HistoryQuery, PredictRequest,
    PredictionResult, RunMetrics, RunRecord, RunRequest, RunResult, TrainReport,
};
use sortviz_core::VizError;

use crate::interfaces::{endpoints, BackendClient};

/// Backend whose answers are fixed up front.
///
/// Runs are synthesised: the input comes from the request's `array` or a
/// deterministic generator for its distribution, and is sorted by insertion
/// sort with one snapshot per outer pass. Runtimes come from
/// [`ScriptedBackend::with_runtime`] (default 1 ms). Every run request is
/// logged for inspection.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    algorithms: Vec<AlgorithmDescriptor>,
    runtimes: HashMap<String, f64>,
    overrides: HashMap<String, Result<RunResult, VizError>>,
    history: Vec<RunRecord>,
    prediction: Option<PredictionResult>,
    train: Option<TrainReport>,
    offline: bool,
    requests: Mutex<Vec<RunRequest>>,
}

impl ScriptedBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the given names; labels are derived from the names.
    #[must_use]
    pub fn with_algorithms(mut self, names: &[&str]) -> Self {
        self.algorithms = names.iter().map(|name| descriptor(name)).collect();
        self
    }

    #[must_use]
    pub fn with_runtime(mut self, algorithm: &str, runtime_ms: f64) -> Self {
        self.runtimes.insert(algorithm.to_string(), runtime_ms);
        self
    }

    /// Return `result` verbatim for every run of `algorithm`.
    #[must_use]
    pub fn with_run_result(mut self, algorithm: &str, result: Result<RunResult, VizError>) -> Self {
        self.overrides.insert(algorithm.to_string(), result);
        self
    }

    #[must_use]
    pub fn with_history(mut self, history: Vec<RunRecord>) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn with_prediction(mut self, prediction: PredictionResult) -> Self {
        self.prediction = Some(prediction);
        self
    }

    #[must_use]
    pub fn with_train_report(mut self, report: TrainReport) -> Self {
        self.train = Some(report);
        self
    }

    /// Fail every call as if the server were unreachable.
    #[must_use]
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Run requests received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RunRequest> {
        self.requests.lock().clone()
    }

    fn reachable(&self, endpoint: &str) -> Result<(), VizError> {
        if self.offline {
            Err(VizError::network(endpoint, "connection refused"))
        } else {
            Ok(())
        }
    }

    fn synthesize(&self, request: &RunRequest) -> Result<RunResult, VizError> {
        if !self.algorithms.is_empty() && !self.algorithms.iter().any(|a| a.name == request.algorithm)
        {
            return Err(VizError::status(endpoints::RUN, 400));
        }
        let input = request
            .array
            .clone()
            .unwrap_or_else(|| generate(request.size, request.distribution));
        let (sorted, steps, comparisons, swaps) = insertion_sort(input, request.record_steps);
        Ok(RunResult {
            metrics: RunMetrics {
                algorithm: request.algorithm.clone(),
                n: sorted.len(),
                distribution: request.distribution.as_str().to_string(),
                runtime_ms: self.runtimes.get(&request.algorithm).copied().unwrap_or(1.0),
                comparisons,
                swaps,
            },
            sorted,
            steps,
        })
    }
}

impl BackendClient for ScriptedBackend {
    fn algorithms(&self) -> Result<Vec<AlgorithmDescriptor>, VizError> {
        self.reachable(endpoints::ALGORITHMS)?;
        Ok(self.algorithms.clone())
    }

    fn run(&self, request: &RunRequest) -> Result<RunResult, VizError> {
        self.requests.lock().push(request.clone());
        self.reachable(endpoints::RUN)?;
        match self.overrides.get(&request.algorithm) {
            Some(result) => result.clone(),
            None => self.synthesize(request),
        }
    }

    fn runs(&self, query: &HistoryQuery) -> Result<Vec<RunRecord>, VizError> {
        self.reachable(endpoints::RUNS)?;
        let mut runs: Vec<RunRecord> = self
            .history
            .iter()
            .filter(|r| query.algorithm.as_ref().map_or(true, |a| &r.algorithm == a))
            .filter(|r| query.min_n.map_or(true, |min| r.n >= min))
            .filter(|r| query.max_n.map_or(true, |max| r.n <= max))
            .cloned()
            .collect();
        if let Some(limit) = query.limit {
            runs.truncate(limit as usize);
        }
        Ok(runs)
    }

    fn predict(&self, _request: &PredictRequest) -> Result<PredictionResult, VizError> {
        self.reachable(endpoints::PREDICT)?;
        self.prediction
            .clone()
            .ok_or_else(|| VizError::status(endpoints::PREDICT, 400))
    }

    fn train(&self) -> Result<TrainReport, VizError> {
        self.reachable(endpoints::TRAIN)?;
        self.train
            .clone()
            .ok_or_else(|| VizError::status(endpoints::TRAIN, 400))
    }

    fn health(&self) -> Result<HealthStatus, VizError> {
        self.reachable(endpoints::HEALTH)?;
        Ok(HealthStatus {
            status: "ok".into(),
        })
    }
}

fn descriptor(name: &str) -> AlgorithmDescriptor {
    let label = name
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ");
    AlgorithmDescriptor {
        name: name.to_string(),
        label,
        best: "O(n)".into(),
        average: "O(n log n)".into(),
        worst: "O(n^2)".into(),
        space: "O(1)".into(),
        description: String::new(),
    }
}

/// Deterministic input for a distribution.
#[allow(clippy::cast_possible_wrap)]
fn generate(size: usize, distribution: Distribution) -> Vec<i64> {
    let ascending = (1..=size as i64).collect::<Vec<_>>();
    match distribution {
        Distribution::Sorted => ascending,
        Distribution::Reverse => ascending.into_iter().rev().collect(),
        Distribution::NearlySorted => {
            let mut values = ascending;
            for i in (0..values.len().saturating_sub(1)).step_by(10) {
                values.swap(i, i + 1);
            }
            values
        }
        Distribution::ManyDuplicates => (0..size as i64).map(|i| i % 5).collect(),
        Distribution::Random => {
            let mut state: u64 = 0x2545_f491_4f6c_dd1d ^ size as u64;
            (0..size)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    (state % 1000) as i64
                })
                .collect()
        }
    }
}

fn insertion_sort(mut values: Vec<i64>, record: bool) -> (Vec<i64>, Vec<Vec<i64>>, u64, u64) {
    let mut steps = Vec::new();
    let mut comparisons = 0;
    let mut swaps = 0;
    if record {
        steps.push(values.clone());
    }
    for i in 1..values.len() {
        let mut j = i;
        while j > 0 {
            comparisons += 1;
            if values[j - 1] <= values[j] {
                break;
            }
            values.swap(j - 1, j);
            swaps += 1;
            j -= 1;
        }
        if record {
            steps.push(values.clone());
        }
    }
    (values, steps, comparisons, swaps)
}
