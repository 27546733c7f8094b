//! Upstream number provider client
//!
//! Provider calls are fail-open: transport errors, non-success statuses, timeouts and
//! malformed bodies all yield an empty list.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    config::ProviderEndpoints,
    errors::ProviderError,
    kind::{FetchStrategy, NumberKind},
    models::NumbersPayload,
};

/// Source of numbers for a kind
#[async_trait]
pub trait NumberProvider: Send + Sync {
    /// Fetch numbers for `kind`. `known` is the current window, submitted to derived kinds.
    ///
    /// Never fails; an unavailable provider yields an empty list.
    async fn fetch(&self, kind: NumberKind, known: &[i64]) -> Vec<i64>;
}

/// HTTP client for the external number providers
#[derive(Debug, Clone)]
pub struct HttpProviderClient {
    client: Client,
    endpoints: ProviderEndpoints,
}

impl HttpProviderClient {
    /// Build a client whose every call is bounded by `endpoints.timeout_ms`
    pub fn new(endpoints: ProviderEndpoints) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("average-calculator/", env!("CARGO_PKG_VERSION")))
            .timeout(endpoints.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, endpoints })
    }

    #[must_use]
    pub const fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    async fn try_fetch(&self, kind: NumberKind, known: &[i64]) -> Result<Vec<i64>, ProviderError> {
        let url = self.endpoints.url_for(kind);

        let mut request = match kind.strategy() {
            FetchStrategy::Derived => self.client.post(url).json(&NumbersPayload {
                numbers: known.to_vec(),
            }),
            FetchStrategy::Unconditional => self.client.get(url),
        };
        if let Some(token) = &self.endpoints.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let payload: NumbersPayload =
            serde_json::from_slice(&body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

        Ok(payload.numbers)
    }
}

#[async_trait]
impl NumberProvider for HttpProviderClient {
    async fn fetch(&self, kind: NumberKind, known: &[i64]) -> Vec<i64> {
        match self.try_fetch(kind, known).await {
            Ok(numbers) => {
                debug!(kind = %kind, count = numbers.len(), "Provider returned numbers");
                numbers
            }
            Err(e) => {
                warn!(kind = %kind, error = %e, "Provider unavailable, continuing with no new numbers");
                Vec::new()
            }
        }
    }
}
