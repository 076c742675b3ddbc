//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::warn;

use crate::domain::StationMetadata;
use crate::gios::SOURCE_NAME;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/station", get(station))
        .route("/reading", get(reading))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Metadata of the monitored station, once resolved.
async fn station(State(state): State<AppState>) -> Result<Json<StationMetadata>, AppError> {
    let snapshot = state.snapshot().await;

    snapshot
        .metadata
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("station {} has not been resolved", snapshot.station_id),
        })
}

/// Latest reading with refresh status.
async fn reading(State(state): State<AppState>) -> Json<ReadingResponse> {
    let snapshot = state.snapshot().await;

    Json(ReadingResponse {
        station_id: snapshot.station_id,
        station_name: snapshot.metadata.map(|m| m.name),
        source: SOURCE_NAME,
        available: !snapshot.reading.is_empty(),
        last_refresh: snapshot.last_refresh,
        outcome: snapshot.last_outcome,
        reading: snapshot.reading,
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
