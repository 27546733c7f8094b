//! Configuration for the Average Calculator service

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};

use crate::{errors::CalculatorError, kind::NumberKind};

/// Average Calculator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Number window configuration
    pub window: WindowConfig,
    /// Upstream number providers
    pub providers: ProviderEndpoints,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Monitoring configuration
    pub monitoring: MonitoringConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable compression
    pub compression: bool,
}

/// Number window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Maximum number of values kept in the window
    pub capacity: usize,
}

/// Upstream provider endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderEndpoints {
    /// Prime numbers provider
    pub primes_url: String,
    /// Fibonacci numbers provider
    pub fibo_url: String,
    /// Even numbers provider
    pub even_url: String,
    /// Random numbers provider
    pub rand_url: String,
    /// Per-call timeout in milliseconds
    pub timeout_ms: u64,
    /// Bearer token sent to providers (optional)
    pub bearer_token: Option<String>,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Allowed headers
    pub allowed_headers: Vec<String>,
    /// Max age for preflight requests
    pub max_age_seconds: u64,
}

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Health check endpoint path
    pub health_path: String,
    /// Log one line per request
    pub request_logging: bool,
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("CALCULATOR").separator("__")
}

const EVALUATION_SERVICE: &str = "http://20.244.56.144/evaluation-service";

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9876,
            compression: true,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            primes_url: format!("{EVALUATION_SERVICE}/primes"),
            fibo_url: format!("{EVALUATION_SERVICE}/fibo"),
            even_url: format!("{EVALUATION_SERVICE}/even"),
            rand_url: format!("{EVALUATION_SERVICE}/rand"),
            timeout_ms: 500,
            bearer_token: None,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["GET".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec!["Authorization".to_string(), "Content-Type".to_string()],
            max_age_seconds: 86400, // 24 hours
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            health_path: "/health".to_string(),
            request_logging: true,
        }
    }
}

impl ProviderEndpoints {
    /// Endpoint serving the given kind
    #[must_use]
    pub fn url_for(&self, kind: NumberKind) -> &str {
        match kind {
            NumberKind::Primes => &self.primes_url,
            NumberKind::Fibonacci => &self.fibo_url,
            NumberKind::Even => &self.even_url,
            NumberKind::Random => &self.rand_url,
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl CalculatorConfig {
    /// Load configuration from file, with `CALCULATOR__SECTION__KEY` environment overrides.
    ///
    /// A missing file is not an error: defaults plus environment apply. A file that exists but
    /// does not parse is.
    pub fn from_file(path: &str) -> Result<Self> {
        Self::from_sources(path, environment())
    }

    fn from_sources(path: &str, env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(env)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Get server address
    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<(), CalculatorError> {
        if self.window.capacity == 0 {
            return Err(CalculatorError::InvalidConfig(
                "window.capacity must be at least 1".to_string(),
            ));
        }
        if self.providers.timeout_ms == 0 {
            return Err(CalculatorError::InvalidConfig(
                "providers.timeout_ms must be greater than 0".to_string(),
            ));
        }
        let health_path = &self.monitoring.health_path;
        if !health_path.starts_with('/') {
            return Err(CalculatorError::InvalidConfig(format!(
                "monitoring.health_path '{health_path}' must start with '/'"
            )));
        }
        if health_path.starts_with("/numbers/") {
            return Err(CalculatorError::InvalidConfig(format!(
                "monitoring.health_path '{health_path}' collides with /numbers/{{kind}}"
            )));
        }
        self.server_address()
            .parse::<SocketAddr>()
            .map_err(|e| {
                CalculatorError::InvalidConfig(format!(
                    "invalid server address '{}': {}",
                    self.server_address(),
                    e
                ))
            })?;
        Ok(())
    }
}
