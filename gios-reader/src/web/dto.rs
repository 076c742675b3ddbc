//! Response types for the status endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ApiId, StationReading};

/// Response of `GET /reading`.
#[derive(Debug, Serialize)]
pub struct ReadingResponse {
    pub station_id: ApiId,
    pub station_name: Option<String>,
    /// Data source attribution.
    pub source: &'static str,
    /// Whether `reading` holds data.
    pub available: bool,
    pub last_refresh: Option<DateTime<Utc>>,
    pub outcome: Option<String>,
    pub reading: StationReading,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
