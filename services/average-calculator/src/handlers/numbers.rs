//! Number window handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::warn;

use crate::{
    aggregator::AverageAggregator,
    errors::CalculatorError,
    models::{AggregateResponse, ErrorResponse},
};

/// Number window handlers
#[derive(Clone, Debug)]
pub struct NumberHandlers {
    aggregator: AverageAggregator,
}

impl NumberHandlers {
    pub const fn new(aggregator: AverageAggregator) -> Self {
        Self { aggregator }
    }

    /// `GET /numbers/{kind}`
    pub async fn get_numbers(
        State(handlers): State<Self>,
        Path(kind): Path<String>,
    ) -> Result<Json<AggregateResponse>, (StatusCode, Json<ErrorResponse>)> {
        match handlers.aggregator.aggregate_label(&kind).await {
            Ok(response) => Ok(Json(response)),
            Err(CalculatorError::InvalidKind(label)) => {
                warn!("Rejected request for unknown number kind '{}'", label);
                Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::invalid_type())))
            }
            Err(e) => {
                warn!("Number request failed: {}", e);
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                ))
            }
        }
    }
}
