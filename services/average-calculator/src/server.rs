//! Average Calculator server implementation

use anyhow::Result;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
};
use std::{net::SocketAddr, sync::Arc, time::Instant};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    aggregator::AverageAggregator,
    config::CalculatorConfig,
    errors::CalculatorError,
    handlers::{HealthHandlers, NumberHandlers},
    kind::NumberKind,
    middleware::{create_cors_layer, logging_middleware},
    models::{AggregateResponse, ErrorResponse, HealthCheckResponse},
    provider::{HttpProviderClient, NumberProvider},
    window::WindowStore,
};

/// Unified application state containing all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub number_handlers: NumberHandlers,
    pub health_handlers: HealthHandlers,
}

/// Average Calculator server
pub struct AverageCalculatorServer {
    config: CalculatorConfig,
    store: Arc<WindowStore>,
    aggregator: AverageAggregator,
    start_time: Instant,
}

impl AverageCalculatorServer {
    /// Create a server that calls the configured HTTP providers
    pub fn new(config: CalculatorConfig) -> Result<Self> {
        config.validate()?;
        let provider = HttpProviderClient::new(config.providers.clone())?;
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Create a server backed by an arbitrary provider
    pub fn with_provider(config: CalculatorConfig, provider: Arc<dyn NumberProvider>) -> Self {
        info!("Initializing Average Calculator server");

        // The window lives for the whole process and starts empty on every restart
        let store = Arc::new(WindowStore::new(config.window.capacity));
        let aggregator = AverageAggregator::new(Arc::clone(&store), provider);

        Self {
            config,
            store,
            aggregator,
            start_time: Instant::now(),
        }
    }

    #[must_use]
    pub fn store(&self) -> Arc<WindowStore> {
        Arc::clone(&self.store)
    }

    /// Start the server and run until Ctrl-C
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self.config.server_address().parse().map_err(|e| {
            error!(
                "Invalid server address '{}': {}",
                self.config.server_address(),
                e
            );
            CalculatorError::StartupFailure(format!("invalid server address: {e}"))
        })?;

        let app = self.router();

        info!("Starting Average Calculator server on {}", addr);

        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => {
                info!("TCP listener bound successfully to {}", addr);
                listener
            }
            Err(e) => {
                error!("Failed to bind TCP listener to {}: {}", addr, e);
                error!(
                    "Please check if the port is already in use or if you have sufficient permissions"
                );
                return Err(CalculatorError::StartupFailure(format!(
                    "failed to bind to address {addr}: {e}"
                ))
                .into());
            }
        };

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            error!("Server encountered a fatal error: {}", e);
            return Err(anyhow::anyhow!("Server error: {}", e));
        }

        info!("Average Calculator server stopped");
        Ok(())
    }

    /// Build the Axum application with all routes and middleware
    pub fn router(&self) -> Router {
        let app_state = AppState {
            number_handlers: NumberHandlers::new(self.aggregator.clone()),
            health_handlers: HealthHandlers::new(Arc::clone(&self.store), self.start_time),
        };
        build_router(&self.config, app_state)
    }
}

/// Assemble routes and layers around `app_state`
pub fn build_router(config: &CalculatorConfig, app_state: AppState) -> Router {
    let mut app = Router::new()
        .route(&config.monitoring.health_path, get(health_check))
        .route("/numbers/:kind", get(get_numbers))
        .with_state(app_state);

    if config.monitoring.request_logging {
        app = app.layer(middleware::from_fn(logging_middleware));
    }
    app = app.layer(TraceLayer::new_for_http());
    if config.server.compression {
        app = app.layer(CompressionLayer::new());
    }
    if config.cors.enabled {
        app = app.layer(create_cors_layer(&config.cors));
    }

    info!("Average Calculator routes configured successfully");
    app
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

// Handler wrapper functions to work with unified state
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    HealthHandlers::health_check(State(state.health_handlers)).await
}

async fn get_numbers(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<AggregateResponse>, (StatusCode, Json<ErrorResponse>)> {
    NumberHandlers::get_numbers(State(state.number_handlers), Path(kind)).await
}

/// API route documentation
pub fn print_routes(config: &CalculatorConfig) {
    println!("Average Calculator Routes:");
    println!("==========================");
    println!();
    println!("Monitoring:");
    println!("  GET  {:<22} - Health check", config.monitoring.health_path);
    println!();
    println!("Numbers:");
    for kind in NumberKind::ALL {
        println!(
            "  GET  /numbers/{:<14} - {} window update",
            kind.label(),
            kind.label()
        );
    }
    println!();
    println!("Responses are JSON; unknown kinds return 400 {{\"error\": \"Invalid type\"}}");
}
