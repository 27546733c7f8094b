//! Average Calculator Service
//!
//! REST service that keeps a bounded, deduplicated window of recently observed numbers and
//! reports its rolling average.
//! Features:
//! - Four number kinds backed by external providers (primes, fibo, even, rand)
//! - Fail-open provider calls with a bounded per-call timeout
//! - Atomic merge-and-evict on a single shared window
//! - Structured request logging and CORS for dashboard consumers

#![allow(missing_docs)]

use anyhow::Result;

pub mod aggregator;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod kind;
pub mod middleware;
pub mod models;
pub mod provider;
pub mod server;
pub mod utils;
pub mod window;

pub use aggregator::AverageAggregator;
pub use config::{CalculatorConfig, CorsConfig, MonitoringConfig, ProviderEndpoints, ServerConfig, WindowConfig};
pub use errors::{CalculatorError, ProviderError};
pub use kind::{FetchStrategy, NumberKind};
pub use provider::{HttpProviderClient, NumberProvider};
pub use server::AverageCalculatorServer;
pub use window::WindowStore;

/// Start the Average Calculator server
pub async fn start_server(config: CalculatorConfig) -> Result<()> {
    let server = AverageCalculatorServer::new(config)?;
    server.start().await
}
