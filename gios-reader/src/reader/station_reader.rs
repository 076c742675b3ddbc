//! The station reader.

use std::collections::BTreeMap;

use tracing::{debug, error, info, warn};

use crate::domain::{
    AQI_KEY, ApiId, PollutantReading, STATION_INDEX_KEY, StationMetadata, StationReading,
    index_level_key,
};
use crate::gios::{GiosError, SensorDto, Transport, api};

use super::error::NoStationError;
use super::outcome::{NoDataReason, RefreshOutcome};

/// Why station resolution stopped the cycle.
enum ResolveError {
    Directory(GiosError),
    NoStation(NoStationError),
}

/// Reads the air-quality data of one measuring station.
///
/// Create one reader per station and call [`refresh`](Self::refresh) from
/// a scheduler. The reading is replaced wholesale by each call: it is
/// either complete or empty, never partially updated.
///
/// `refresh` takes `&mut self`, so cycles on one reader cannot overlap.
#[derive(Debug)]
pub struct StationReader<T> {
    transport: T,
    station_id: ApiId,
    metadata: Option<StationMetadata>,
    reading: StationReading,
}

impl<T: Transport> StationReader<T> {
    /// Create a reader for `station_id`. No request is made until the
    /// first refresh.
    pub fn new(station_id: impl Into<ApiId>, transport: T) -> Self {
        Self {
            transport,
            station_id: station_id.into(),
            metadata: None,
            reading: StationReading::empty(),
        }
    }

    /// Run one update cycle.
    ///
    /// Data problems are reported through the returned [`RefreshOutcome`]
    /// and leave the reading empty. The only error is an unknown station
    /// ID, which no amount of retrying will fix.
    pub async fn refresh(&mut self) -> Result<RefreshOutcome, NoStationError> {
        if self.metadata.is_none() {
            match self.resolve_metadata().await {
                Ok(metadata) => {
                    info!(
                        station = %metadata.id,
                        name = %metadata.name,
                        "resolved measuring station"
                    );
                    self.metadata = Some(metadata);
                }
                Err(ResolveError::Directory(e)) => {
                    error!(error = %e, "failed to retrieve the measuring stations list");
                    return Ok(RefreshOutcome::DirectoryUnavailable(e));
                }
                Err(ResolveError::NoStation(e)) => {
                    error!(station = %self.station_id, "{e}");
                    self.reading = StationReading::empty();
                    return Err(e);
                }
            }
        }

        match self.assemble().await {
            Ok(reading) => {
                debug!(station = %self.station_id, entries = reading.len(), "reading updated");
                self.reading = reading;
                Ok(RefreshOutcome::Updated)
            }
            Err(reason) => {
                error!(station = %self.station_id, %reason, "invalid data from GIOS API");
                self.reading = StationReading::empty();
                Ok(RefreshOutcome::NoData(reason))
            }
        }
    }

    /// The most recently assembled reading (empty if the last cycle failed).
    pub fn current_reading(&self) -> &StationReading {
        &self.reading
    }

    /// Whether the current reading holds data.
    pub fn has_data(&self) -> bool {
        !self.reading.is_empty()
    }

    /// The configured station ID.
    pub fn station_id(&self) -> &ApiId {
        &self.station_id
    }

    /// Station metadata, once resolved.
    pub fn metadata(&self) -> Option<&StationMetadata> {
        self.metadata.as_ref()
    }

    pub fn station_name(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.name.as_str())
    }

    pub fn latitude(&self) -> Option<f64> {
        self.metadata.as_ref().map(|m| m.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.metadata.as_ref().map(|m| m.longitude)
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn resolve_metadata(&self) -> Result<StationMetadata, ResolveError> {
        let stations = api::fetch_stations(&self.transport)
            .await
            .map_err(ResolveError::Directory)?;

        stations
            .into_iter()
            .find(|s| s.id == self.station_id)
            .map(|s| StationMetadata::new(s.id, s.station_name, s.gegr_lat, s.gegr_lon))
            .ok_or_else(|| {
                ResolveError::NoStation(NoStationError {
                    station_id: self.station_id.clone(),
                })
            })
    }

    /// Fetch sensors, values and index levels into a complete reading.
    async fn assemble(&self) -> Result<StationReading, NoDataReason> {
        let sensors = api::fetch_sensors(&self.transport, &self.station_id)
            .await
            .map_err(|e| {
                warn!(error = %e, "sensor list request failed");
                NoDataReason::SensorsUnavailable
            })?;

        if sensors.is_empty() {
            return Err(NoDataReason::NoSensors);
        }

        // One sensor per pollutant code; a later duplicate replaces an earlier one.
        let sensors: BTreeMap<String, SensorDto> = sensors
            .into_iter()
            .filter(|s| s.param.param_code != AQI_KEY)
            .map(|s| (s.param.param_code.clone(), s))
            .collect();

        let mut measured = Vec::with_capacity(sensors.len());
        for (code, sensor) in sensors {
            let data = api::fetch_sensor_data(&self.transport, &sensor.id)
                .await
                .map_err(|e| {
                    warn!(
                        sensor = %sensor.id,
                        param = %code,
                        error = %e,
                        "sensor data request failed"
                    );
                    NoDataReason::SensorValuesUnavailable {
                        param_code: code.clone(),
                    }
                })?;

            let Some(value) = data.latest_value() else {
                return Err(NoDataReason::SensorValuesUnavailable { param_code: code });
            };
            measured.push((code, sensor, value));
        }

        let indexes = api::fetch_indexes(&self.transport, &self.station_id)
            .await
            .map_err(|e| {
                warn!(error = %e, "index levels request failed");
                NoDataReason::IndexesUnavailable
            })?;

        let level = |key: String| match indexes.level_name(&key) {
            Some(name) => Ok(name.to_lowercase()),
            None => Err(NoDataReason::IndexLevelMissing { key }),
        };

        let mut pollutants = BTreeMap::new();
        for (code, sensor, value) in measured {
            let index = level(index_level_key(&code))?;
            pollutants.insert(
                code,
                PollutantReading {
                    id: sensor.id,
                    name: sensor.param.param_name,
                    value,
                    index,
                },
            );
        }
        let overall = level(STATION_INDEX_KEY.to_string())?;

        Ok(StationReading::complete(pollutants, overall))
    }
}
