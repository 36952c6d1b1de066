//! Backend access seam.
//!
//! Everything above this trait is testable without a network; the HTTP
//! implementation lives in `sortviz-client`.

use sortviz_core::model::{
    AlgorithmDescriptor, HealthStatus, HistoryQuery, PredictRequest, PredictionResult, RunRecord,
    RunRequest, RunResult, TrainReport,
};
use sortviz_core::VizError;

/// Endpoint paths, relative to the API base URL.
pub mod endpoints {
    pub const ALGORITHMS: &str = "/api/algorithms";
    pub const RUN: &str = "/api/run";
    pub const RUNS: &str = "/api/runs";
    pub const PREDICT: &str = "/api/predict";
    pub const TRAIN: &str = "/api/train";
    pub const HEALTH: &str = "/health";
}

/// Blocking client for the sorting backend.
///
/// Implementations map every transport, status and decoding failure to
/// [`VizError::Network`].
pub trait BackendClient: Send + Sync {
    /// `GET /api/algorithms`.
    fn algorithms(&self) -> Result<Vec<AlgorithmDescriptor>, VizError>;

    /// `POST /api/run`.
    fn run(&self, request: &RunRequest) -> Result<RunResult, VizError>;

    /// `GET /api/runs` with optional filters.
    fn runs(&self, query: &HistoryQuery) -> Result<Vec<RunRecord>, VizError>;

    /// `POST /api/predict`.
    fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, VizError>;

    /// `POST /api/train`.
    fn train(&self) -> Result<TrainReport, VizError>;

    /// `GET /health`.
    fn health(&self) -> Result<HealthStatus, VizError>;
}
