//! Error types for the Average Calculator service

use thiserror::Error;

/// Errors surfaced by the service
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// Requested number kind is not one of the recognized labels
    #[error("Invalid number kind: {0}")]
    InvalidKind(String),

    /// Service could not start (bind failure, runtime setup)
    #[error("Startup failure: {0}")]
    StartupFailure(String),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Upstream provider failures.
///
/// These never reach the caller: the provider client logs them and degrades to an empty
/// fetch result.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection or request-level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-success status
    #[error("Provider returned status {0}")]
    Status(u16),

    /// Provider did not answer within the configured timeout
    #[error("Provider call timed out")]
    Timeout,

    /// Response body was not a valid numbers payload
    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
