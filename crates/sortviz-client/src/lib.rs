//! # sortviz-client
//!
//! [`HttpBackend`] talks to the sorting backend over HTTP with a blocking
//! `reqwest` client. Every failure becomes a [`VizError::Network`] naming
//! the endpoint.
//!
//! [`VizError::Network`]: sortviz_core::VizError::Network

pub mod http;

pub use http::{normalize_base_url, HttpBackend};
