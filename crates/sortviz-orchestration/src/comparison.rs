//! Multi-algorithm comparison sessions.
//!
//! A comparison runs several algorithms against one `(size, distribution)`
//! configuration. Each invocation gets a fresh [`SessionToken`]; outcomes
//! carrying any other token are rejected, so a slow leg from an earlier
//! comparison can never overwrite the current one.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use sortviz_core::model::{Distribution, RunRequest, RunResult};
use sortviz_core::session::{SessionToken, TokenIssuer};
use sortviz_core::validation::SizeLimits;
use sortviz_core::VizError;

use crate::run::RunOrchestrator;

/// Shared configuration of every leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonConfig {
    pub size: usize,
    pub distribution: Distribution,
    /// Input array given to every algorithm. Without it each leg sorts its
    /// own generated instance.
    pub shared_input: Option<Vec<i64>>,
}

impl ComparisonConfig {
    #[must_use]
    pub fn new(size: usize, distribution: Distribution) -> Self {
        Self {
            size,
            distribution,
            shared_input: None,
        }
    }

    /// Use `input` for every leg; the size follows its length.
    #[must_use]
    pub fn with_shared_input(mut self, input: Vec<i64>) -> Self {
        self.size = input.len();
        self.shared_input = Some(input);
        self
    }

    #[must_use]
    pub fn fidelity(&self) -> InputFidelity {
        if self.shared_input.is_some() {
            InputFidelity::SharedInput
        } else {
            InputFidelity::IndependentInputs
        }
    }
}

/// Whether the legs sorted identical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFidelity {
    /// Every leg sorted the same array.
    SharedInput,
    /// Each leg sorted its own instance of the distribution; runtimes are
    /// indicative only.
    IndependentInputs,
}

impl InputFidelity {
    /// Caveat to show next to the results, if any.
    #[must_use]
    pub fn caveat(self) -> Option<&'static str> {
        match self {
            Self::SharedInput => None,
            Self::IndependentInputs => {
                Some("each algorithm sorted its own random instance of this distribution")
            }
        }
    }
}

/// One request of a comparison plan.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonLeg {
    pub algorithm: String,
    pub request: RunRequest,
}

/// Requests to execute for one comparison session.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPlan {
    pub token: SessionToken,
    pub legs: Vec<ComparisonLeg>,
}

/// Completed leg, tagged with the session it belongs to.
#[derive(Debug, Clone)]
pub struct LegOutcome {
    pub token: SessionToken,
    pub algorithm: String,
    pub result: Result<RunResult, VizError>,
}

/// State of the live comparison.
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    token: SessionToken,
    algorithms: Vec<String>,
    config: ComparisonConfig,
    results: HashMap<String, Result<RunResult, VizError>>,
    winner: Option<String>,
}

impl ComparisonSession {
    #[must_use]
    pub fn token(&self) -> SessionToken {
        self.token
    }

    /// Algorithms in display order, without duplicates.
    #[must_use]
    pub fn algorithms(&self) -> &[String] {
        &self.algorithms
    }

    #[must_use]
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    #[must_use]
    pub fn fidelity(&self) -> InputFidelity {
        self.config.fidelity()
    }

    /// Outcome for `algorithm`, once it has arrived.
    #[must_use]
    pub fn result(&self, algorithm: &str) -> Option<&Result<RunResult, VizError>> {
        self.results.get(algorithm)
    }

    /// Fastest successful algorithm so far.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Algorithms still waiting for an outcome, in display order.
    #[must_use]
    pub fn pending(&self) -> Vec<&str> {
        self.algorithms
            .iter()
            .filter(|a| !self.results.contains_key(*a))
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.results.len() == self.algorithms.len()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.results.values().filter(|r| r.is_err()).count()
    }
}

/// Fastest successful algorithm; ties go to the earliest in `algorithms`.
///
/// Non-finite runtimes never win.
#[must_use]
pub fn pick_winner(
    algorithms: &[String],
    results: &HashMap<String, Result<RunResult, VizError>>,
) -> Option<String> {
    let mut best: Option<(&String, f64)> = None;
    for algorithm in algorithms {
        let Some(Ok(result)) = results.get(algorithm) else {
            continue;
        };
        let runtime = result.metrics.runtime_ms;
        if !runtime.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, b)| runtime < b) {
            best = Some((algorithm, runtime));
        }
    }
    best.map(|(name, _)| name.clone())
}

/// Owns the current comparison session and its token.
#[derive(Debug, Default)]
pub struct ComparisonOrchestrator {
    issuer: TokenIssuer,
    session: Option<ComparisonSession>,
    limits: SizeLimits,
}

impl ComparisonOrchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limits(mut self, limits: SizeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Start a comparison, replacing any earlier session.
    ///
    /// Duplicate names are collapsed, keeping the first occurrence. On a
    /// validation error the current session is left untouched.
    pub fn begin<S: AsRef<str>>(
        &mut self,
        algorithms: &[S],
        config: ComparisonConfig,
    ) -> Result<ComparisonPlan, VizError> {
        let mut ordered: Vec<String> = Vec::with_capacity(algorithms.len());
        for name in algorithms {
            let name = name.as_ref().trim();
            if !name.is_empty() && !ordered.iter().any(|a| a == name) {
                ordered.push(name.to_string());
            }
        }
        if ordered.is_empty() {
            return Err(VizError::Validation("select at least one algorithm".into()));
        }
        self.limits.check(config.size)?;
        if let Some(input) = &config.shared_input {
            if input.len() != config.size {
                return Err(VizError::Validation(format!(
                    "shared input has {} elements, size is {}",
                    input.len(),
                    config.size
                )));
            }
        }

        let token = self.issuer.issue();
        let legs = ordered
            .iter()
            .map(|algorithm| {
                let request =
                    RunRequest::metrics_only(algorithm.as_str(), config.size, config.distribution);
                let request = match &config.shared_input {
                    Some(input) => request.with_array(input.clone()),
                    None => request,
                };
                ComparisonLeg {
                    algorithm: algorithm.clone(),
                    request,
                }
            })
            .collect();

        if let Some(caveat) = config.fidelity().caveat() {
            debug!(%token, caveat, "comparison inputs are not shared");
        }
        info!(
            %token,
            algorithms = ordered.len(),
            size = config.size,
            distribution = %config.distribution,
            "comparison started"
        );
        self.session = Some(ComparisonSession {
            token,
            algorithms: ordered,
            config,
            results: HashMap::new(),
            winner: None,
        });
        Ok(ComparisonPlan { token, legs })
    }

    /// Record a finished leg.
    ///
    /// Returns `Err(VizError::Stale)` for an outcome of a superseded session;
    /// the session is not touched in that case. Outcomes for algorithms that
    /// are not part of the session are ignored (`Ok(false)`).
    pub fn accept(&mut self, outcome: LegOutcome) -> Result<bool, VizError> {
        self.issuer.check(outcome.token)?;
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };
        if !session.algorithms.contains(&outcome.algorithm) {
            debug!(algorithm = %outcome.algorithm, "outcome for algorithm outside session");
            return Ok(false);
        }
        if let Err(err) = &outcome.result {
            warn!(algorithm = %outcome.algorithm, error = %err, "comparison leg failed");
        }
        session.results.insert(outcome.algorithm, outcome.result);
        session.winner = pick_winner(&session.algorithms, &session.results);
        if session.is_complete() {
            info!(
                token = %session.token,
                winner = session.winner.as_deref().unwrap_or("none"),
                failures = session.failure_count(),
                "comparison finished"
            );
        }
        Ok(true)
    }

    /// Drop the current session; in-flight outcomes become stale.
    pub fn invalidate(&mut self) {
        self.issuer.invalidate();
        self.session = None;
    }

    #[must_use]
    pub fn session(&self) -> Option<&ComparisonSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn current_token(&self) -> SessionToken {
        self.issuer.current()
    }

    /// Run a whole comparison on the rayon pool and return the finished
    /// session. Leg failures are recorded in the session; only validation
    /// errors are returned.
    pub fn run_blocking<S: AsRef<str>>(
        &mut self,
        runner: &RunOrchestrator,
        algorithms: &[S],
        config: ComparisonConfig,
    ) -> Result<&ComparisonSession, VizError> {
        let plan = self.begin(algorithms, config)?;
        let outcomes: Vec<LegOutcome> = plan
            .legs
            .par_iter()
            .map(|leg| LegOutcome {
                token: plan.token,
                algorithm: leg.algorithm.clone(),
                result: runner.run(&leg.request),
            })
            .collect();
        for outcome in outcomes {
            self.accept(outcome)?;
        }
        self.session
            .as_ref()
            .ok_or_else(|| VizError::Validation("comparison session was dropped".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::scripted::ScriptedBackend;
    use sortviz_core::model::RunMetrics;

    fn result(algorithm: &str, runtime_ms: f64) -> RunResult {
        RunResult {
            sorted: vec![1, 2, 3],
            metrics: RunMetrics {
                algorithm: algorithm.into(),
                n: 3,
                distribution: "random".into(),
                runtime_ms,
                comparisons: 0,
                swaps: 0,
            },
            steps: vec![],
        }
    }

    fn outcome(token: SessionToken, algorithm: &str, runtime_ms: f64) -> LegOutcome {
        LegOutcome {
            token,
            algorithm: algorithm.into(),
            result: Ok(result(algorithm, runtime_ms)),
        }
    }

    fn config() -> ComparisonConfig {
        ComparisonConfig::new(40, Distribution::Random)
    }

    #[test]
    fn begin_plans_metrics_only_legs() {
        let mut orch = ComparisonOrchestrator::new();
        let plan = orch.begin(&["bubble_sort", "merge_sort"], config()).unwrap();
        assert_eq!(plan.legs.len(), 2);
        assert!(plan.legs.iter().all(|l| !l.request.record_steps));
        assert!(plan.legs.iter().all(|l| l.request.size == 40));
        assert_eq!(orch.session().unwrap().pending(), vec!["bubble_sort", "merge_sort"]);
        assert_eq!(orch.session().unwrap().fidelity(), InputFidelity::IndependentInputs);
    }

    #[test]
    fn duplicates_collapse_to_first() {
        let mut orch = ComparisonOrchestrator::new();
        let plan = orch
            .begin(&["quick_sort", "merge_sort", "quick_sort"], config())
            .unwrap();
        let names: Vec<&str> = plan.legs.iter().map(|l| l.algorithm.as_str()).collect();
        assert_eq!(names, vec!["quick_sort", "merge_sort"]);
    }

    #[test]
    fn empty_set_rejected_and_session_kept() {
        let mut orch = ComparisonOrchestrator::new();
        let plan = orch.begin(&["merge_sort"], config()).unwrap();
        let empty: [&str; 0] = [];
        assert!(matches!(orch.begin(&empty, config()), Err(VizError::Validation(_))));
        assert!(matches!(
            orch.begin(&["merge_sort"], ComparisonConfig::new(5000, Distribution::Random)),
            Err(VizError::Validation(_))
        ));
        assert_eq!(orch.current_token(), plan.token);
        assert!(orch.session().is_some());
    }

    #[test]
    fn stale_outcome_rejected() {
        let mut orch = ComparisonOrchestrator::new();
        let first = orch.begin(&["a", "b"], config()).unwrap();
        let second = orch.begin(&["a", "b"], config()).unwrap();
        assert!(second.token > first.token);

        let err = orch.accept(outcome(first.token, "a", 1.0)).unwrap_err();
        assert!(err.is_stale());
        assert!(orch.session().unwrap().result("a").is_none());

        assert!(orch.accept(outcome(second.token, "a", 2.0)).unwrap());
        assert_eq!(orch.session().unwrap().winner(), Some("a"));
    }

    #[test]
    fn quick_sort_beats_merge_and_bubble() {
        let mut orch = ComparisonOrchestrator::new();
        let plan = orch
            .begin(&["bubble_sort", "merge_sort", "quick_sort"], config())
            .unwrap();
        orch.accept(outcome(plan.token, "bubble_sort", 120.0)).unwrap();
        orch.accept(outcome(plan.token, "merge_sort", 45.0)).unwrap();
        orch.accept(outcome(plan.token, "quick_sort", 30.0)).unwrap();
        let session = orch.session().unwrap();
        assert!(session.is_complete());
        assert_eq!(session.winner(), Some("quick_sort"));
    }

    #[test]
    fn winner_is_fastest_with_ties_by_position() {
        let mut orch = ComparisonOrchestrator::new();
        let plan = orch.begin(&["a", "b", "c"], config()).unwrap();
        orch.accept(outcome(plan.token, "c", 1.0)).unwrap();
        orch.accept(outcome(plan.token, "a", 3.0)).unwrap();
        assert_eq!(orch.session().unwrap().winner(), Some("c"));
        orch.accept(outcome(plan.token, "b", 1.0)).unwrap();
        assert_eq!(orch.session().unwrap().winner(), Some("b"));
        assert!(orch.session().unwrap().is_complete());
    }

    #[test]
    fn failures_do_not_win_or_abort() {
        let mut orch = ComparisonOrchestrator::new();
        let plan = orch.begin(&["a", "b"], config()).unwrap();
        orch.accept(LegOutcome {
            token: plan.token,
            algorithm: "a".into(),
            result: Err(VizError::status("/api/run", 500)),
        })
        .unwrap();
        assert_eq!(orch.session().unwrap().winner(), None);
        orch.accept(outcome(plan.token, "b", 9.0)).unwrap();
        let session = orch.session().unwrap();
        assert_eq!(session.winner(), Some("b"));
        assert_eq!(session.failure_count(), 1);
    }

    #[test]
    fn non_finite_runtime_never_wins() {
        let names = vec!["a".to_string(), "b".to_string()];
        let mut results = HashMap::new();
        results.insert("a".to_string(), Ok(result("a", f64::NAN)));
        results.insert("b".to_string(), Ok(result("b", 4.0)));
        assert_eq!(pick_winner(&names, &results).as_deref(), Some("b"));
    }

    #[test]
    fn outsider_outcome_ignored() {
        let mut orch = ComparisonOrchestrator::new();
        let plan = orch.begin(&["a"], config()).unwrap();
        assert!(!orch.accept(outcome(plan.token, "z", 0.1)).unwrap());
        assert!(orch.session().unwrap().result("z").is_none());
    }

    #[test]
    fn invalidate_makes_in_flight_stale() {
        let mut orch = ComparisonOrchestrator::new();
        let plan = orch.begin(&["a"], config()).unwrap();
        orch.invalidate();
        assert!(orch.session().is_none());
        assert!(orch.accept(outcome(plan.token, "a", 1.0)).unwrap_err().is_stale());
    }

    #[test]
    fn shared_input_goes_to_every_leg() {
        let input: Vec<i64> = (0..20).rev().collect();
        let mut orch = ComparisonOrchestrator::new();
        let plan = orch
            .begin(
                &["a", "b"],
                ComparisonConfig::new(40, Distribution::Reverse).with_shared_input(input.clone()),
            )
            .unwrap();
        assert!(plan
            .legs
            .iter()
            .all(|l| l.request.array.as_ref() == Some(&input) && l.request.size == 20));
        assert_eq!(orch.session().unwrap().fidelity(), InputFidelity::SharedInput);
        assert!(InputFidelity::SharedInput.caveat().is_none());
    }

    #[test]
    fn run_blocking_collects_all_legs() {
        let backend = ScriptedBackend::new()
            .with_runtime("bubble_sort", 12.0)
            .with_runtime("merge_sort", 2.0)
            .with_runtime("quick_sort", 1.5);
        let runner = RunOrchestrator::new(Arc::new(backend));
        let mut orch = ComparisonOrchestrator::new();
        let session = orch
            .run_blocking(&runner, &["bubble_sort", "merge_sort", "quick_sort"], config())
            .unwrap();
        assert!(session.is_complete());
        assert_eq!(session.winner(), Some("quick_sort"));
    }
}
