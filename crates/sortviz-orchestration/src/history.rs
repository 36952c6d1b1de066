//! Historical run telemetry.

use std::sync::Arc;

use tracing::debug;

use sortviz_core::constants::DEFAULT_HISTORY_LIMIT;
use sortviz_core::model::{HistoryQuery, RunRecord};
use sortviz_core::VizError;

use crate::interfaces::BackendClient;

/// Client-side algorithm filter over fetched runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HistoryFilter {
    #[default]
    All,
    Algorithm(String),
}

impl HistoryFilter {
    #[must_use]
    pub fn matches(&self, record: &RunRecord) -> bool {
        match self {
            Self::All => true,
            Self::Algorithm(name) => &record.algorithm == name,
        }
    }

    /// Next filter in the cycle `All → names[0] → … → All`.
    #[must_use]
    pub fn cycle(&self, names: &[String]) -> Self {
        let next_index = match self {
            Self::All => 0,
            Self::Algorithm(name) => match names.iter().position(|n| n == name) {
                Some(i) => i + 1,
                None => names.len(),
            },
        };
        names
            .get(next_index)
            .map_or(Self::All, |name| Self::Algorithm(name.clone()))
    }

    #[must_use]
    pub fn algorithm(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Algorithm(name) => Some(name),
        }
    }
}

/// Runs matching `filter`, preserving order.
#[must_use]
pub fn filter_runs<'a>(runs: &'a [RunRecord], filter: &HistoryFilter) -> Vec<&'a RunRecord> {
    runs.iter().filter(|r| filter.matches(r)).collect()
}

/// Fetches run history from the backend.
#[derive(Clone)]
pub struct HistoryBrowser {
    client: Arc<dyn BackendClient>,
}

impl HistoryBrowser {
    #[must_use]
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        Self { client }
    }

    /// Default query: most recent runs of every algorithm.
    #[must_use]
    pub fn recent() -> HistoryQuery {
        HistoryQuery {
            limit: Some(DEFAULT_HISTORY_LIMIT),
            ..HistoryQuery::default()
        }
    }

    pub fn fetch(&self, query: &HistoryQuery) -> Result<Vec<RunRecord>, VizError> {
        validate_query(query)?;
        let runs = self.client.runs(query)?;
        debug!(count = runs.len(), ?query, "history fetched");
        Ok(runs)
    }
}

fn validate_query(query: &HistoryQuery) -> Result<(), VizError> {
    if let (Some(min), Some(max)) = (query.min_n, query.max_n) {
        if min > max {
            return Err(VizError::Validation(format!(
                "min_n {min} is greater than max_n {max}"
            )));
        }
    }
    if query.limit == Some(0) {
        return Err(VizError::Validation("limit must be positive".into()));
    }
    Ok(())
}
