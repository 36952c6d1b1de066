//! Single "run algorithm" requests.

use std::sync::Arc;

use tracing::{debug, warn};

use sortviz_core::model::{RunRequest, RunResult};
use sortviz_core::validation::SizeLimits;
use sortviz_core::VizError;

use crate::interfaces::BackendClient;

/// Validates a run request, sends it, and normalises the response.
#[derive(Clone)]
pub struct RunOrchestrator {
    client: Arc<dyn BackendClient>,
    limits: SizeLimits,
}

impl RunOrchestrator {
    #[must_use]
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self {
            client,
            limits: SizeLimits::RUN_FORM,
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: SizeLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn limits(&self) -> SizeLimits {
        self.limits
    }

    #[must_use]
    pub fn client(&self) -> &Arc<dyn BackendClient> {
        &self.client
    }

    /// Check a request without sending it.
    pub fn validate(&self, request: &RunRequest) -> Result<(), VizError> {
        if request.algorithm.trim().is_empty() {
            return Err(VizError::Validation("no algorithm selected".into()));
        }
        self.limits.check(request.size)?;
        if let Some(array) = &request.array {
            if array.len() != request.size {
                return Err(VizError::Validation(format!(
                    "input array has {} elements, size is {}",
                    array.len(),
                    request.size
                )));
            }
        }
        Ok(())
    }

    /// Execute one run.
    ///
    /// For recorded runs the returned trace is guaranteed non-empty and to
    /// end with the sorted array.
    pub fn run(&self, request: &RunRequest) -> Result<RunResult, VizError> {
        self.validate(request)?;
        debug!(
            algorithm = %request.algorithm,
            size = request.size,
            distribution = %request.distribution,
            record_steps = request.record_steps,
            "run requested"
        );
        let result = self.client.run(request)?;
        Ok(normalize(request, result))
    }
}

/// Make a recorded trace end at the sorted output.
fn normalize(request: &RunRequest, mut result: RunResult) -> RunResult {
    if !request.record_steps {
        return result;
    }
    if result.steps.last() != Some(&result.sorted) {
        warn!(
            algorithm = %request.algorithm,
            frames = result.steps.len(),
            "trace does not end at the sorted output; appending final frame"
        );
        result.steps.push(result.sorted.clone());
    }
    result
}
