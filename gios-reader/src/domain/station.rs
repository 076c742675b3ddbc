//! Measuring station metadata.

use serde::Serialize;

use super::ApiId;

/// Display name and position of a measuring station.
///
/// Resolved from the station directory on the first refresh and never
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMetadata {
    pub id: ApiId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl StationMetadata {
    /// Create station metadata.
    pub fn new(id: ApiId, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            latitude,
            longitude,
        }
    }
}
