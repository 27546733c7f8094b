//! Health check handlers

use axum::{extract::State, response::Json};
use std::{sync::Arc, time::Instant};

use crate::{models::HealthCheckResponse, window::WindowStore};

/// Health check handlers
#[derive(Clone, Debug)]
pub struct HealthHandlers {
    store: Arc<WindowStore>,
    start_time: Instant,
}

impl HealthHandlers {
    pub const fn new(store: Arc<WindowStore>, start_time: Instant) -> Self {
        Self { store, start_time }
    }

    /// Health check endpoint; reads the window without mutating it
    pub async fn health_check(State(handlers): State<Self>) -> Json<HealthCheckResponse> {
        Json(HealthCheckResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: handlers.start_time.elapsed().as_secs(),
            window_size: handlers.store.len(),
            window_capacity: handlers.store.capacity(),
        })
    }
}
