//! Prediction flow: validate, request, interpret, project.

use std::sync::Arc;

use tracing::{debug, warn};

use sortviz_core::model::{PredictRequest, PredictionResult};
use sortviz_core::prediction::ClassConfidence;
use sortviz_core::projection::{PredictionProjector, ProjectedCurve};
use sortviz_core::validation::check_predict_n;
use sortviz_core::VizError;

use crate::interfaces::BackendClient;

/// Validated prediction with its projected curve.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    pub request: PredictRequest,
    pub result: PredictionResult,
    /// Most probable class; this is the class reported to the user.
    pub top: ClassConfidence,
    pub curve: ProjectedCurve,
}

#[derive(Clone)]
pub struct Predictor {
    client: Arc<dyn BackendClient>,
    projector: PredictionProjector,
}

impl Predictor {
    #[must_use]
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self {
            client,
            projector: PredictionProjector::default(),
        }
    }

    #[must_use]
    pub fn with_projector(mut self, projector: PredictionProjector) -> Self {
        self.projector = projector;
        self
    }

    pub fn predict(&self, request: &PredictRequest) -> Result<PredictionOutcome, VizError> {
        if request.algorithm.trim().is_empty() {
            return Err(VizError::Validation("no algorithm selected".into()));
        }
        check_predict_n(request.n)?;

        let result = self.client.predict(request)?;
        result.validate()?;
        let top = result
            .top_class()
            .ok_or_else(|| VizError::Validation("prediction has no class probabilities".into()))?;
        if top.label != result.predicted_class {
            warn!(
                reported = %result.predicted_class,
                most_probable = %top.label,
                "predicted class disagrees with probabilities; using the most probable"
            );
        }
        let curve = self.projector.project(&top.label, result.predicted_runtime_ms);
        debug!(class = %top.label, runtime_ms = result.predicted_runtime_ms, "prediction ready");
        Ok(PredictionOutcome {
            request: request.clone(),
            result,
            top,
            curve,
        })
    }
}
