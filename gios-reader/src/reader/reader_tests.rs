//! Refresh-cycle tests for the station reader against a mock transport.

use super::*;
use crate::domain::{AQI_KEY, ApiId, ReadingEntry};
use crate::gios::{GiosClient, GiosConfig, GiosError, MockTransport};
use crate::gios::api::{STATIONS_PATH, indexes_path, sensor_data_path, sensors_path};
use serde_json::{Value, json};

const STATION: u64 = 117;

fn station() -> ApiId {
    ApiId::from(STATION)
}

fn directory() -> Value {
    json!([
        {"id": 14, "stationName": "Działoszyn", "gegrLat": "50.972167", "gegrLon": "14.941319"},
        {"id": STATION, "stationName": "Kraków, Aleja Krasińskiego", "gegrLat": "50.057678", "gegrLon": "19.926189"}
    ])
}

fn sensors() -> Value {
    json!([
        {"id": 672, "stationId": STATION, "param": {"paramName": "pył zawieszony PM10", "paramFormula": "PM10", "paramCode": "PM10", "idParam": 3}},
        {"id": 14395, "stationId": STATION, "param": {"paramName": "pył zawieszony PM2.5", "paramFormula": "PM2.5", "paramCode": "PM2.5", "idParam": 69}},
        {"id": 665, "stationId": STATION, "param": {"paramName": "dwutlenek azotu", "paramFormula": "NO2", "paramCode": "NO2", "idParam": 6}}
    ])
}

fn values(values: &[Option<f64>]) -> Value {
    let values: Vec<Value> = values
        .iter()
        .map(|v| json!({"date": "2024-03-15 12:00:00", "value": v}))
        .collect();
    json!({"key": "X", "values": values})
}

fn indexes() -> Value {
    json!({
        "id": STATION,
        "stCalcDate": "2024-03-15 12:20:00",
        "stIndexLevel": {"id": 1, "indexLevelName": "Dobry"},
        "pm10IndexLevel": {"id": 1, "indexLevelName": "Dobry"},
        "pm25IndexLevel": {"id": 2, "indexLevelName": "Umiarkowany"},
        "no2IndexLevel": {"id": 0, "indexLevelName": "Bardzo dobry"},
        "so2IndexLevel": null
    })
}

/// A healthy upstream for station 117.
fn upstream() -> MockTransport {
    MockTransport::new()
        .with_json(STATIONS_PATH, directory())
        .with_json(&sensors_path(&station()), sensors())
        .with_json(&sensor_data_path(&ApiId::from(672u64)), values(&[Some(31.4), Some(29.0)]))
        .with_json(&sensor_data_path(&ApiId::from(14395u64)), values(&[None, Some(42.0)]))
        .with_json(&sensor_data_path(&ApiId::from(665u64)), values(&[Some(12.7)]))
        .with_json(&indexes_path(&station()), indexes())
}

fn reader(transport: MockTransport) -> StationReader<MockTransport> {
    StationReader::new(station(), transport)
}

#[tokio::test]
async fn successful_cycle_populates_every_pollutant() {
    let mut reader = reader(upstream());

    let outcome = reader.refresh().await.unwrap();

    assert!(outcome.is_updated());
    assert!(reader.has_data());

    let reading = reader.current_reading();
    assert_eq!(reading.len(), 4);

    let pm10 = reading.pollutant("PM10").unwrap();
    assert_eq!(pm10.id, ApiId::from(672u64));
    assert_eq!(pm10.name, "pył zawieszony PM10");
    assert_eq!(pm10.value, 31.4);
    assert_eq!(pm10.index, "dobry");

    let pm25 = reading.pollutant("PM2.5").unwrap();
    assert_eq!(pm25.value, 42.0);
    assert_eq!(pm25.index, "umiarkowany");

    let no2 = reading.pollutant("NO2").unwrap();
    assert_eq!(no2.value, 12.7);
    assert_eq!(no2.index, "bardzo dobry");

    assert_eq!(reading.air_quality_index(), Some("dobry"));
}

#[tokio::test]
async fn overall_index_entry_has_only_name_and_value() {
    let mut reader = reader(upstream());
    reader.refresh().await.unwrap();

    match reader.current_reading().get(AQI_KEY) {
        Some(ReadingEntry::Index(index)) => {
            assert_eq!(index.name, AQI_KEY);
            assert_eq!(index.value, "dobry");
        }
        other => panic!("expected overall index entry, got {other:?}"),
    }

    let json = serde_json::to_value(reader.current_reading()).unwrap();
    assert_eq!(json[AQI_KEY], json!({"name": "AQI", "value": "dobry"}));
}

#[tokio::test]
async fn metadata_is_resolved_once() {
    let mut reader = reader(upstream());

    reader.refresh().await.unwrap();
    reader.refresh().await.unwrap();
    reader.refresh().await.unwrap();

    assert_eq!(reader.transport().request_count(STATIONS_PATH), 1);
    assert_eq!(
        reader.transport().request_count(&sensors_path(&station())),
        3
    );

    assert_eq!(reader.station_name(), Some("Kraków, Aleja Krasińskiego"));
    assert_eq!(reader.latitude(), Some(50.057678));
    assert_eq!(reader.longitude(), Some(19.926189));
    assert_eq!(reader.metadata().unwrap().id, station());
}

#[tokio::test]
async fn refresh_is_idempotent_for_unchanged_upstream() {
    let mut reader = reader(upstream());

    reader.refresh().await.unwrap();
    let first = reader.current_reading().clone();
    reader.refresh().await.unwrap();

    assert_eq!(reader.current_reading(), &first);
}

#[tokio::test]
async fn unknown_station_is_an_error() {
    let transport = upstream();
    let mut reader = StationReader::new("aa01", transport);

    let err = reader.refresh().await.unwrap_err();

    assert_eq!(err.station_id, ApiId::new("aa01"));
    assert!(!reader.has_data());
    assert!(reader.current_reading().is_empty());
    assert!(reader.metadata().is_none());
    assert_eq!(reader.transport().requested_paths(), vec![STATIONS_PATH.to_string()]);
}

#[tokio::test]
async fn directory_failure_is_transient() {
    let transport = upstream().with_status(STATIONS_PATH, 500, "Internal Server Error");
    let mut reader = reader(transport);

    let outcome = reader.refresh().await.unwrap();

    match outcome {
        RefreshOutcome::DirectoryUnavailable(e) => assert_eq!(e.status(), Some(500)),
        other => panic!("expected DirectoryUnavailable, got {other:?}"),
    }
    assert!(!reader.has_data());
    assert!(reader.metadata().is_none());

    // Station resolves on the next cycle once the directory is back.
    reader.transport().set_json(STATIONS_PATH, directory());
    assert!(reader.refresh().await.unwrap().is_updated());
    assert!(reader.has_data());
}

#[tokio::test]
async fn empty_directory_is_transient() {
    let transport = upstream().with_json(STATIONS_PATH, json!([]));
    let mut reader = reader(transport);

    let outcome = reader.refresh().await.unwrap();

    assert!(matches!(outcome, RefreshOutcome::DirectoryUnavailable(_)));
}

#[tokio::test]
async fn refused_directory_connection_is_transient() {
    let client = GiosClient::new(
        GiosConfig::new()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(5),
    )
    .unwrap();
    let mut reader = StationReader::new(station(), client);

    let outcome = reader.refresh().await.unwrap();

    assert!(
        matches!(outcome, RefreshOutcome::DirectoryUnavailable(GiosError::Http(_))),
        "got {outcome:?}"
    );
    assert!(!reader.has_data());
    assert!(reader.metadata().is_none());
}

#[tokio::test]
async fn unreachable_directory_is_transient() {
    let transport = upstream().with_unreachable(STATIONS_PATH);
    let mut reader = reader(transport);

    let outcome = reader.refresh().await.unwrap();

    assert!(matches!(
        outcome,
        RefreshOutcome::DirectoryUnavailable(GiosError::Http(_))
    ));
}

#[tokio::test]
async fn unreachable_sensor_list_clears_reading() {
    let mut reader = reader(upstream());
    reader.refresh().await.unwrap();

    reader.transport().set_unreachable(&sensors_path(&station()));
    let outcome = reader.refresh().await.unwrap();

    assert!(matches!(
        outcome,
        RefreshOutcome::NoData(NoDataReason::SensorsUnavailable)
    ));
    assert!(!reader.has_data());
}

#[tokio::test]
async fn unreachable_sensor_data_clears_reading() {
    let mut reader = reader(upstream());
    reader.refresh().await.unwrap();

    reader
        .transport()
        .set_unreachable(&sensor_data_path(&ApiId::from(665u64)));
    let outcome = reader.refresh().await.unwrap();

    assert_eq!(outcome.to_string(), "no data: no recent value for NO2");
    assert!(!reader.has_data());
}

#[tokio::test]
async fn unreachable_indexes_clear_reading() {
    let mut reader = reader(upstream());
    reader.refresh().await.unwrap();

    reader.transport().set_unreachable(&indexes_path(&station()));
    let outcome = reader.refresh().await.unwrap();

    assert!(matches!(
        outcome,
        RefreshOutcome::NoData(NoDataReason::IndexesUnavailable)
    ));
    assert!(!reader.has_data());
}

#[tokio::test]
async fn sensor_list_failure_clears_reading() {
    let mut reader = reader(upstream());
    reader.refresh().await.unwrap();
    assert!(reader.has_data());

    reader
        .transport()
        .set_status(&sensors_path(&station()), 503, "unavailable");
    let outcome = reader.refresh().await.unwrap();

    assert!(matches!(
        outcome,
        RefreshOutcome::NoData(NoDataReason::SensorsUnavailable)
    ));
    assert!(!reader.has_data());
}

#[tokio::test]
async fn empty_sensor_list_clears_reading() {
    let transport = upstream().with_json(&sensors_path(&station()), json!([]));
    let mut reader = reader(transport);

    let outcome = reader.refresh().await.unwrap();

    assert!(matches!(
        outcome,
        RefreshOutcome::NoData(NoDataReason::NoSensors)
    ));
    assert!(!reader.has_data());
}

#[tokio::test]
async fn malformed_sensor_list_clears_reading() {
    let transport =
        upstream().with_json(&sensors_path(&station()), json!([{"id": 672, "param": null}]));
    let mut reader = reader(transport);

    let outcome = reader.refresh().await.unwrap();

    assert!(matches!(
        outcome,
        RefreshOutcome::NoData(NoDataReason::SensorsUnavailable)
    ));
}

#[tokio::test]
async fn two_null_values_fail_the_cycle() {
    let mut reader = reader(upstream());
    reader.refresh().await.unwrap();

    reader
        .transport()
        .set_json(&sensor_data_path(&ApiId::from(14395u64)), values(&[None, None]));
    let outcome = reader.refresh().await.unwrap();

    assert_eq!(
        outcome.to_string(),
        "no data: no recent value for PM2.5"
    );
    assert!(reader.current_reading().is_empty());
}

#[tokio::test]
async fn single_null_value_fails_the_cycle() {
    let transport =
        upstream().with_json(&sensor_data_path(&ApiId::from(665u64)), values(&[None]));
    let mut reader = reader(transport);

    let outcome = reader.refresh().await.unwrap();

    assert!(matches!(
        outcome,
        RefreshOutcome::NoData(NoDataReason::SensorValuesUnavailable { .. })
    ));
}

#[tokio::test]
async fn sensor_request_failure_fails_the_cycle() {
    let transport =
        upstream().with_status(&sensor_data_path(&ApiId::from(672u64)), 500, "boom");
    let mut reader = reader(transport);

    let outcome = reader.refresh().await.unwrap();

    assert!(matches!(
        outcome,
        RefreshOutcome::NoData(NoDataReason::SensorValuesUnavailable { ref param_code }) if param_code == "PM10"
    ));
    assert!(!reader.has_data());
}

#[tokio::test]
async fn tolerates_non_string_key_and_date() {
    let transport = upstream().with_json(
        &sensor_data_path(&ApiId::from(672u64)),
        json!({"key": 3, "values": [{"date": 1710500000, "value": 31.4}]}),
    );
    let mut reader = reader(transport);

    let outcome = reader.refresh().await.unwrap();

    assert!(outcome.is_updated(), "got {outcome}");
    assert_eq!(reader.current_reading().pollutant("PM10").unwrap().value, 31.4);
}

#[tokio::test]
async fn missing_pollutant_index_clears_reading() {
    let mut doc = indexes();
    doc.as_object_mut().unwrap().remove("pm10IndexLevel");
    let transport = upstream().with_json(&indexes_path(&station()), doc);
    let mut reader = reader(transport);

    let outcome = reader.refresh().await.unwrap();

    assert!(matches!(
        outcome,
        RefreshOutcome::NoData(NoDataReason::IndexLevelMissing { ref key }) if key == "pm10IndexLevel"
    ));
    assert!(reader.current_reading().is_empty());
}

#[tokio::test]
async fn null_station_index_clears_reading() {
    let mut doc = indexes();
    doc["stIndexLevel"] = Value::Null;
    let transport = upstream().with_json(&indexes_path(&station()), doc);
    let mut reader = reader(transport);

    let outcome = reader.refresh().await.unwrap();

    assert!(matches!(
        outcome,
        RefreshOutcome::NoData(NoDataReason::IndexLevelMissing { ref key }) if key == "stIndexLevel"
    ));
    assert!(!reader.has_data());
}

#[tokio::test]
async fn index_request_failure_clears_reading() {
    let mut reader = reader(upstream());
    reader.refresh().await.unwrap();

    reader
        .transport()
        .set_status(&indexes_path(&station()), 404, "not found");
    let outcome = reader.refresh().await.unwrap();

    assert!(matches!(
        outcome,
        RefreshOutcome::NoData(NoDataReason::IndexesUnavailable)
    ));
    assert!(!reader.has_data());
}

#[tokio::test]
async fn overall_index_sensor_is_not_fetched() {
    let mut list = sensors();
    list.as_array_mut().unwrap().push(json!(
        {"id": 9999, "param": {"paramName": "indeks", "paramCode": "AQI"}}
    ));
    let transport = upstream().with_json(&sensors_path(&station()), list);
    let mut reader = reader(transport);

    assert!(reader.refresh().await.unwrap().is_updated());

    assert_eq!(
        reader
            .transport()
            .request_count(&sensor_data_path(&ApiId::from(9999u64))),
        0
    );
    assert_eq!(reader.current_reading().air_quality_index(), Some("dobry"));
    assert_eq!(reader.current_reading().pollutants().count(), 3);
}

#[tokio::test]
async fn recovers_after_failed_cycle() {
    let transport = upstream().with_status(&indexes_path(&station()), 500, "boom");
    let mut reader = reader(transport);

    assert!(!reader.refresh().await.unwrap().is_updated());
    assert!(!reader.has_data());

    reader
        .transport()
        .set_json(&indexes_path(&station()), indexes());
    assert!(reader.refresh().await.unwrap().is_updated());
    assert_eq!(reader.current_reading().len(), 4);
}

#[tokio::test]
async fn every_pollutant_entry_is_complete() {
    let mut reader = reader(upstream());
    reader.refresh().await.unwrap();

    for (code, entry) in reader.current_reading().iter() {
        match entry {
            ReadingEntry::Pollutant(p) => {
                assert_ne!(code, AQI_KEY);
                assert!(p.value.is_finite());
                assert!(!p.index.is_empty());
                assert_eq!(p.index, p.index.to_lowercase());
            }
            ReadingEntry::Index(i) => {
                assert_eq!(code, AQI_KEY);
                assert_eq!(i.name, AQI_KEY);
            }
        }
    }
}
