//! REST API models and request/response types

use serde::{Deserialize, Serialize};

/// Result of one `/numbers/{kind}` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    /// Window contents immediately before this request's merge
    pub window_prev_state: Vec<i64>,
    /// Window contents immediately after this request's merge
    pub window_curr_state: Vec<i64>,
    /// Raw numbers fetched from the provider
    pub numbers: Vec<i64>,
    /// Mean of `window_curr_state`, two decimal places
    pub avg: f64,
}

/// Error response model
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn invalid_type() -> Self {
        Self {
            error: "Invalid type".to_string(),
        }
    }
}

/// Body exchanged with upstream providers, in both directions
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NumbersPayload {
    #[serde(default)]
    pub numbers: Vec<i64>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Service version
    pub version: String,
    /// Service uptime in seconds
    pub uptime_seconds: u64,
    /// Current number of values in the window
    pub window_size: usize,
    /// Maximum number of values in the window
    pub window_capacity: usize,
}
