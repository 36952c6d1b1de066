//! TUI message and command types (Elm Messages and effects).

use std::sync::Arc;

use sortviz_core::model::{
    AlgorithmDescriptor, HistoryQuery, PredictRequest, RunRecord, RunRequest, RunResult,
    TrainReport,
};
use sortviz_core::scheduler::TimerId;
use sortviz_core::session::SessionToken;
use sortviz_core::VizError;
use sortviz_orchestration::comparison::{ComparisonPlan, LegOutcome};
use sortviz_orchestration::predictor::PredictionOutcome;

use crate::keymap::KeyAction;

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone)]
pub enum TuiMessage {
    /// Key press forwarded from the event loop.
    Key(KeyAction),
    /// Playback timer fired.
    Tick(TimerId),
    Resize { width: u16, height: u16 },
    CatalogLoaded(Result<Arc<Vec<AlgorithmDescriptor>>, VizError>),
    RunFinished {
        token: SessionToken,
        result: Result<RunResult, VizError>,
    },
    /// One comparison leg finished; carries its own session token.
    ComparisonLeg(LegOutcome),
    HistoryLoaded {
        token: SessionToken,
        result: Result<Vec<RunRecord>, VizError>,
    },
    PredictionReady {
        token: SessionToken,
        result: Result<PredictionOutcome, VizError>,
    },
    TrainFinished(Result<TrainReport, VizError>),
    Log(String),
    Quit,
}

/// Side effects requested by the model, executed by the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadCatalog,
    Run {
        token: SessionToken,
        request: RunRequest,
    },
    Compare(ComparisonPlan),
    FetchHistory {
        token: SessionToken,
        query: HistoryQuery,
    },
    Predict {
        token: SessionToken,
        request: PredictRequest,
    },
    Train,
}

impl Command {
    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LoadCatalog => "load-catalog",
            Self::Run { .. } => "run",
            Self::Compare(_) => "compare",
            Self::FetchHistory { .. } => "fetch-history",
            Self::Predict { .. } => "predict",
            Self::Train => "train",
        }
    }
}
