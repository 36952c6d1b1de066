//! Blocking HTTP backend.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sortviz_core::model::{
    AlgorithmDescriptor, HealthStatus, HistoryQuery, PredictRequest, PredictionResult, RunRecord,
    RunRequest, RunResult, TrainReport,
};
use sortviz_core::VizError;
use sortviz_orchestration::interfaces::{endpoints, BackendClient};

/// Longest error body excerpt kept in an error message.
const MAX_ERROR_BODY: usize = 200;

/// Error body shape used by the backend (`{"detail": "..."}`).
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Strip trailing slashes so endpoint paths can be appended directly.
#[must_use]
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// [`BackendClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, VizError> {
        let base_url = normalize_base_url(base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(VizError::Validation(format!(
                "API URL must start with http:// or https://, got {base_url:?}"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VizError::network("client", e.to_string()))?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint path.
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, VizError> {
        let builder = self.client.get(self.endpoint_url(path)).query(query);
        self.send(path, builder)
    }

    fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, VizError> {
        let builder = self.client.post(self.endpoint_url(path));
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        self.send(path, builder)
    }

    fn send<T: DeserializeOwned>(&self, path: &str, builder: RequestBuilder) -> Result<T, VizError> {
        debug!(endpoint = path, base_url = %self.base_url, "request");
        let response = builder.send().map_err(|e| transport_error(path, &e))?;
        let status = response.status();
        let text = response.text().map_err(|e| transport_error(path, &e))?;

        if !status.is_success() {
            let error = status_error(path, status.as_u16(), &text);
            warn!(endpoint = path, status = status.as_u16(), error = %error, "request failed");
            return Err(error);
        }
        serde_json::from_str(&text).map_err(|e| VizError::Network {
            endpoint: path.to_string(),
            status: Some(status.as_u16()),
            reason: format!("invalid response body: {e}"),
        })
    }
}

fn transport_error(path: &str, err: &reqwest::Error) -> VizError {
    let reason = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    };
    VizError::network(path, reason)
}

fn status_error(path: &str, status: u16, body: &str) -> VizError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| match b.detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .unwrap_or_else(|| body.trim().chars().take(MAX_ERROR_BODY).collect());
    let reason = if detail.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {detail}")
    };
    VizError::Network {
        endpoint: path.to_string(),
        status: Some(status),
        reason,
    }
}

impl BackendClient for HttpBackend {
    fn algorithms(&self) -> Result<Vec<AlgorithmDescriptor>, VizError> {
        self.get_json(endpoints::ALGORITHMS, &[])
    }

    fn run(&self, request: &RunRequest) -> Result<RunResult, VizError> {
        self.post_json(endpoints::RUN, Some(request))
    }

    fn runs(&self, query: &HistoryQuery) -> Result<Vec<RunRecord>, VizError> {
        self.get_json(endpoints::RUNS, &query.query_pairs())
    }

    fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, VizError> {
        self.post_json(endpoints::PREDICT, Some(request))
    }

    fn train(&self) -> Result<TrainReport, VizError> {
        self.post_json::<(), _>(endpoints::TRAIN, None)
    }

    fn health(&self) -> Result<HealthStatus, VizError> {
        self.get_json(endpoints::HEALTH, &[])
    }
}
