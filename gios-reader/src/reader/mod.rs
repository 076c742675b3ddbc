//! Station reader: one best-effort refresh cycle per call.
//!
//! The reader resolves its station in the directory once, then on every
//! refresh fetches the station's sensors, each sensor's latest value and
//! the station's index levels, and replaces its reading wholesale.

mod error;
mod outcome;
mod station_reader;

#[cfg(test)]
mod reader_tests;

pub use error::NoStationError;
pub use outcome::{NoDataReason, RefreshOutcome};
pub use station_reader::StationReader;
