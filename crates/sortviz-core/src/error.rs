//! Error taxonomy shared by every SortViz crate.

/// Error type for backend access, input validation and stale results.
///
/// `Clone` so outcomes can be stored in a session and shipped across the
/// worker channel.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VizError {
    /// Request failed, returned a non-success status, or could not be decoded.
    #[error("{endpoint}: {reason}")]
    Network {
        /// Endpoint path, e.g. `/api/run`.
        endpoint: String,
        /// HTTP status when the server answered.
        status: Option<u16>,
        /// Human-readable cause.
        reason: String,
    },

    /// Input outside the accepted range.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Result from a session that has since been superseded.
    #[error("stale result from session {token} (current is {current})")]
    Stale {
        /// Token carried by the result.
        token: u64,
        /// Token of the live session.
        current: u64,
    },
}

impl VizError {
    /// Build a network error without an HTTP status.
    pub fn network(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            endpoint: endpoint.into(),
            status: None,
            reason: reason.into(),
        }
    }

    /// Build a network error for a non-success HTTP status.
    pub fn status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Network {
            endpoint: endpoint.into(),
            status: Some(status),
            reason: format!("HTTP {status}"),
        }
    }

    /// Whether this is a stale-result rejection.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }

    /// Whether the user should see this error.
    ///
    /// Stale results are dropped silently.
    #[must_use]
    pub fn is_user_visible(&self) -> bool {
        !self.is_stale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message() {
        let err = VizError::status("/api/run", 503);
        assert_eq!(err.to_string(), "/api/run: HTTP 503");
        assert!(matches!(err, VizError::Network { status: Some(503), .. }));
    }

    #[test]
    fn stale_is_not_user_visible() {
        let err = VizError::Stale { token: 1, current: 2 };
        assert!(err.is_stale());
        assert!(!err.is_user_visible());
        assert!(VizError::Validation("size".into()).is_user_visible());
    }
}
