//! Domain types for station readings.
//!
//! These types are independent of the GIOS wire format; the `gios` module
//! decodes API responses and the `reader` module assembles them into
//! these types.

mod id;
mod reading;
mod station;

pub use id::ApiId;
pub use reading::{
    AQI_KEY, IndexReading, PollutantReading, ReadingEntry, STATION_INDEX_KEY, StationReading,
    index_level_key,
};
pub use station::StationMetadata;
