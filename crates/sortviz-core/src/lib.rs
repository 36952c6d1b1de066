//! # sortviz-core
//!
//! Shared data model, error taxonomy, session tokens, the step-playback
//! engine and the runtime projection used by every other SortViz crate.

pub mod constants;
pub mod error;
pub mod model;
pub mod playback;
pub mod prediction;
pub mod projection;
pub mod scheduler;
pub mod session;
pub mod validation;

pub use error::VizError;
pub use model::{
    AlgorithmDescriptor, Distribution, HealthStatus, HistoryQuery, PredictRequest,
    PredictionResult, RunMetrics, RunRecord, RunRequest, RunResult, TrainReport,
};
pub use playback::{PlaybackEngine, PlaybackState};
pub use projection::{ExponentTable, PredictionProjector, ProjectedCurve, ProjectedPoint};
pub use scheduler::{DeadlineScheduler, TickScheduler, TimerId};
pub use session::{SessionToken, TokenIssuer};
