//! Typed GIOS endpoint calls on top of a [`Transport`].

use serde::de::DeserializeOwned;

use crate::domain::ApiId;

use super::client::Transport;
use super::error::GiosError;
use super::types::{IndexDocument, SensorDataDto, SensorDto, StationDto};

/// Directory of all measuring stations.
pub const STATIONS_PATH: &str = "/station/findAll";

/// Sensors installed at a station.
pub fn sensors_path(station_id: &ApiId) -> String {
    format!("/station/sensors/{station_id}")
}

/// Recent measurements of one sensor.
pub fn sensor_data_path(sensor_id: &ApiId) -> String {
    format!("/data/getData/{sensor_id}")
}

/// Index levels of a station.
pub fn indexes_path(station_id: &ApiId) -> String {
    format!("/aqindex/getIndex/{station_id}")
}

/// GET `path` and decode the body as JSON.
pub async fn fetch_json<T, D>(transport: &T, path: &str) -> Result<D, GiosError>
where
    T: Transport,
    D: DeserializeOwned,
{
    let body = transport.get(path).await?;

    serde_json::from_str(&body).map_err(|e| GiosError::Json {
        message: format!("{path}: {e}"),
    })
}

/// Fetch the station directory.
///
/// An empty directory is reported as [`GiosError::Empty`].
pub async fn fetch_stations<T: Transport>(transport: &T) -> Result<Vec<StationDto>, GiosError> {
    let stations: Vec<StationDto> = fetch_json(transport, STATIONS_PATH).await?;
    if stations.is_empty() {
        return Err(GiosError::Empty {
            path: STATIONS_PATH.to_string(),
        });
    }
    Ok(stations)
}

/// Fetch the sensors installed at a station.
pub async fn fetch_sensors<T: Transport>(
    transport: &T,
    station_id: &ApiId,
) -> Result<Vec<SensorDto>, GiosError> {
    fetch_json(transport, &sensors_path(station_id)).await
}

/// Fetch the recent measurements of a sensor.
pub async fn fetch_sensor_data<T: Transport>(
    transport: &T,
    sensor_id: &ApiId,
) -> Result<SensorDataDto, GiosError> {
    fetch_json(transport, &sensor_data_path(sensor_id)).await
}

/// Fetch the index-level document of a station.
pub async fn fetch_indexes<T: Transport>(
    transport: &T,
    station_id: &ApiId,
) -> Result<IndexDocument, GiosError> {
    fetch_json(transport, &indexes_path(station_id)).await
}
