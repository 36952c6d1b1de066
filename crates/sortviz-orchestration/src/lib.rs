//! # sortviz-orchestration
//!
//! Request flows built on an injected [`BackendClient`]: single runs,
//! comparisons with stale-result rejection, the algorithm catalog, history
//! browsing and predictions.

pub mod catalog;
pub mod comparison;
pub mod history;
pub mod interfaces;
pub mod predictor;
pub mod run;
pub mod scripted;

pub use catalog::AlgorithmCatalog;
pub use comparison::{
    pick_winner, ComparisonConfig, ComparisonLeg, ComparisonOrchestrator, ComparisonPlan,
    ComparisonSession, InputFidelity, LegOutcome,
};
pub use history::{filter_runs, HistoryBrowser, HistoryFilter};
pub use interfaces::{endpoints, BackendClient};
pub use predictor::{PredictionOutcome, Predictor};
pub use run::RunOrchestrator;
pub use scripted::ScriptedBackend;
