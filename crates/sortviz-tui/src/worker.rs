//! Bridge between backend requests and TUI messages.
//!
//! Commands run on background threads and report back over the message
//! channel. Every result carries the session token it was issued with; the
//! model decides whether it is still wanted.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::Sender;
use rayon::prelude::*;
use tracing::{debug, warn};

use sortviz_orchestration::catalog::AlgorithmCatalog;
use sortviz_orchestration::comparison::{ComparisonPlan, LegOutcome};
use sortviz_orchestration::history::HistoryBrowser;
use sortviz_orchestration::interfaces::BackendClient;
use sortviz_orchestration::predictor::Predictor;
use sortviz_orchestration::run::RunOrchestrator;

use crate::messages::{Command, TuiMessage};

/// Executes [`Command`]s against a backend client.
#[derive(Clone)]
pub struct Worker {
    client: Arc<dyn BackendClient>,
    catalog: Arc<AlgorithmCatalog>,
    runner: RunOrchestrator,
    history: HistoryBrowser,
    predictor: Predictor,
    tx: Sender<TuiMessage>,
}

impl Worker {
    #[must_use]
    pub fn new(client: Arc<dyn BackendClient>, tx: Sender<TuiMessage>) -> Self {
        Self {
            catalog: Arc::new(AlgorithmCatalog::new()),
            runner: RunOrchestrator::new(Arc::clone(&client)),
            history: HistoryBrowser::new(Arc::clone(&client)),
            predictor: Predictor::new(Arc::clone(&client)),
            client,
            tx,
        }
    }

    /// Run `command` on a background thread.
    pub fn dispatch(&self, command: Command) {
        let worker = self.clone();
        let kind = command.kind();
        let spawned = thread::Builder::new()
            .name(format!("sortviz-{kind}"))
            .spawn(move || worker.execute(command));
        if let Err(e) = spawned {
            warn!(command = kind, error = %e, "failed to spawn worker thread");
            let _ = self
                .tx
                .send(TuiMessage::Log(format!("[ERROR] could not start {kind}: {e}")));
        }
    }

    /// Run `command` on the calling thread.
    pub fn execute(&self, command: Command) {
        debug!(command = command.kind(), "executing");
        match command {
            Command::LoadCatalog => {
                let result = self.catalog.load(self.client.as_ref());
                self.send(TuiMessage::CatalogLoaded(result));
            }
            Command::Run { token, request } => {
                let result = self.runner.run(&request);
                self.send(TuiMessage::RunFinished { token, result });
            }
            Command::Compare(plan) => self.compare(&plan),
            Command::FetchHistory { token, query } => {
                let result = self.history.fetch(&query);
                self.send(TuiMessage::HistoryLoaded { token, result });
            }
            Command::Predict { token, request } => {
                let result = self.predictor.predict(&request);
                self.send(TuiMessage::PredictionReady { token, result });
            }
            Command::Train => {
                let result = self.client.train();
                self.send(TuiMessage::TrainFinished(result));
            }
        }
    }

    /// Fan the legs out on the rayon pool; each outcome is sent as soon as it
    /// completes.
    fn compare(&self, plan: &ComparisonPlan) {
        plan.legs.par_iter().for_each(|leg| {
            let result = self.runner.run(&leg.request);
            self.send(TuiMessage::ComparisonLeg(LegOutcome {
                token: plan.token,
                algorithm: leg.algorithm.clone(),
                result,
            }));
        });
    }

    fn send(&self, msg: TuiMessage) {
        if self.tx.send(msg).is_err() {
            debug!("message channel closed; dropping result");
        }
    }
}
