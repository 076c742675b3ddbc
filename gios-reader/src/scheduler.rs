//! Periodic refresh of a station reader.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::gios::Transport;
use crate::reader::{NoStationError, RefreshOutcome, StationReader};
use crate::web::AppState;

/// Run one cycle and publish the result.
///
/// Returns the error of a cycle that found the station ID to be invalid.
pub async fn refresh_and_publish<T: Transport>(
    reader: &mut StationReader<T>,
    state: &AppState,
) -> Result<RefreshOutcome, NoStationError> {
    let result = reader.refresh().await;

    let summary = match &result {
        Ok(outcome) => outcome.to_string(),
        Err(e) => e.to_string(),
    };
    state.publish(reader, summary).await;

    match &result {
        Ok(RefreshOutcome::Updated) => info!(
            station = %reader.station_id(),
            entries = reader.current_reading().len(),
            "refreshed air quality reading"
        ),
        Ok(outcome) => warn!(
            station = %reader.station_id(),
            %outcome,
            "no air quality data this cycle"
        ),
        Err(_) => {}
    }

    result
}

/// Refresh every `period` until the station ID turns out to be invalid.
///
/// The first cycle runs immediately. Cycles never overlap: a slow cycle
/// delays the next tick instead of bunching them.
pub async fn run<T: Transport>(mut reader: StationReader<T>, state: AppState, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if let Err(e) = refresh_and_publish(&mut reader, &state).await {
            error!(error = %e, "stopping refresh");
            return;
        }
    }
}
