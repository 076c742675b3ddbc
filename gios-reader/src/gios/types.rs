//! GIOS API response DTOs.
//!
//! These types map directly to the GIOS `pjp-api` JSON responses. Only the
//! fields the reader consumes are declared; everything else is ignored.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::domain::ApiId;

/// Entry of `station/findAll`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id: ApiId,
    pub station_name: String,
    /// Latitude. Sent as a string (`"50.057678"`) by the live API.
    #[serde(deserialize_with = "deserialize_coordinate")]
    pub gegr_lat: f64,
    /// Longitude. Same encoding as `gegr_lat`.
    #[serde(deserialize_with = "deserialize_coordinate")]
    pub gegr_lon: f64,
}

/// Entry of `station/sensors/{stationId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorDto {
    /// Sensor ID, used for `data/getData/{sensorId}`.
    pub id: ApiId,
    pub param: ParamDto,
}

/// The parameter a sensor measures.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDto {
    /// Pollutant code, e.g. `"PM2.5"`.
    pub param_code: String,
    /// Display name, e.g. `"pył zawieszony PM2.5"`.
    pub param_name: String,
}

/// Response of `data/getData/{sensorId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorDataDto {
    /// Measurements, newest first.
    pub values: Vec<SensorValueDto>,
}

/// One measurement. `value` is null while the newest hour is still being
/// processed upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorValueDto {
    pub value: Option<f64>,
}

impl SensorDataDto {
    /// The latest usable value.
    ///
    /// Only the two newest slots are consulted: the first if non-null,
    /// otherwise the second.
    pub fn latest_value(&self) -> Option<f64> {
        self.values.iter().take(2).find_map(|v| v.value)
    }
}

/// Response of `aqindex/getIndex/{stationId}`.
///
/// The document mixes level objects (`"pm10IndexLevel": {...}`), nulls and
/// plain scalars (`"stCalcDate"`), so it is kept as a raw JSON object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct IndexDocument(Map<String, Value>);

impl IndexDocument {
    /// The `indexLevelName` under `key`, if present and a string.
    pub fn level_name(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.get("indexLevelName")?.as_str()
    }
}

/// Wire form of a coordinate: a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(f64),
    Text(String),
}

fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawCoordinate::deserialize(deserializer)? {
        RawCoordinate::Number(n) => Ok(n),
        RawCoordinate::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid coordinate: {s:?}"))),
    }
}
