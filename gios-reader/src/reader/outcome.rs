//! Result of a refresh cycle.

use std::fmt;

use crate::gios::GiosError;

/// How a refresh cycle ended, short of a configuration error.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// A complete reading replaced the previous one.
    Updated,

    /// Station data was missing or malformed; the reading was cleared.
    NoData(NoDataReason),

    /// The station directory could not be fetched; nothing was changed.
    DirectoryUnavailable(GiosError),
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, RefreshOutcome::Updated)
    }
}

impl fmt::Display for RefreshOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshOutcome::Updated => write!(f, "updated"),
            RefreshOutcome::NoData(reason) => write!(f, "no data: {reason}"),
            RefreshOutcome::DirectoryUnavailable(e) => {
                write!(f, "station directory unavailable: {e}")
            }
        }
    }
}

/// Which step of the cycle produced no usable data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoDataReason {
    /// Sensor list request failed or could not be decoded
    #[error("sensor list unavailable")]
    SensorsUnavailable,

    /// Station reported no sensors
    #[error("station has no sensors")]
    NoSensors,

    /// Neither of the two newest values of a sensor was usable
    #[error("no recent value for {param_code}")]
    SensorValuesUnavailable { param_code: String },

    /// Index document request failed or could not be decoded
    #[error("index levels unavailable")]
    IndexesUnavailable,

    /// Index document lacks a level name
    #[error("index level {key} missing")]
    IndexLevelMissing { key: String },
}
