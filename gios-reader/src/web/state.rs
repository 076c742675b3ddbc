//! Application state for the web layer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::{ApiId, StationMetadata, StationReading};
use crate::gios::Transport;
use crate::reader::StationReader;

/// What the status endpoints serve: a copy of the reader's state after its
/// latest cycle.
#[derive(Debug, Clone)]
pub struct StationSnapshot {
    pub station_id: ApiId,
    pub metadata: Option<StationMetadata>,
    pub reading: StationReading,
    /// When the latest cycle finished.
    pub last_refresh: Option<DateTime<Utc>>,
    /// How the latest cycle ended.
    pub last_outcome: Option<String>,
}

/// Shared application state.
///
/// The refresh task publishes into it, the handlers read from it.
#[derive(Clone)]
pub struct AppState {
    snapshot: Arc<RwLock<StationSnapshot>>,
}

impl AppState {
    /// Create state for a station that has not been refreshed yet.
    pub fn new(station_id: ApiId) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(StationSnapshot {
                station_id,
                metadata: None,
                reading: StationReading::empty(),
                last_refresh: None,
                last_outcome: None,
            })),
        }
    }

    /// Copy of the latest snapshot.
    pub async fn snapshot(&self) -> StationSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Replace the snapshot with the reader's current state.
    pub async fn publish<T: Transport>(&self, reader: &StationReader<T>, outcome: String) {
        let snapshot = StationSnapshot {
            station_id: reader.station_id().clone(),
            metadata: reader.metadata().cloned(),
            reading: reader.current_reading().clone(),
            last_refresh: Some(Utc::now()),
            last_outcome: Some(outcome),
        };

        let mut guard = self.snapshot.write().await;
        *guard = snapshot;
    }
}
