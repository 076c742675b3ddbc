//! GIOS air-quality API client.
//!
//! This module talks to the public REST API of the Polish Chief
//! Inspectorate of Environmental Protection (GIOŚ).
//!
//! Key characteristics of the API:
//! - Identifiers are integers, coordinates are numeric strings
//! - The newest measurement of a sensor is often `null` until the hour is
//!   processed, so the reader looks one slot back
//! - Index levels are keyed `"<code>IndexLevel"` with the pollutant code
//!   lowercased and stripped of periods

pub mod api;
mod client;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, GiosClient, GiosConfig, Transport};
pub use error::GiosError;
pub use mock::MockTransport;
pub use types::{IndexDocument, ParamDto, SensorDataDto, SensorDto, SensorValueDto, StationDto};

/// Display name of the data source.
pub const SOURCE_NAME: &str = "GIOŚ";
