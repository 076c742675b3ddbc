//! Assembled air-quality reading for one station.
//!
//! A reading maps pollutant codes (`"PM10"`, `"PM2.5"`, ...) to the latest
//! measurement and its qualitative index level, plus one reserved entry
//! under [`AQI_KEY`] carrying the station's overall index level.
//!
//! A reading is either empty or complete: the only non-empty constructor
//! takes every pollutant together with the overall level.

use std::collections::BTreeMap;

use serde::Serialize;

use super::ApiId;

/// Reserved key of the overall air-quality index entry.
pub const AQI_KEY: &str = "AQI";

/// Key of the overall station level in the index document.
pub const STATION_INDEX_KEY: &str = "stIndexLevel";

/// Suffix appended to a normalized pollutant code to form its index key.
const INDEX_LEVEL_SUFFIX: &str = "IndexLevel";

/// Derive the index-document key for a pollutant code.
///
/// The code is lowercased and stripped of periods before the suffix is
/// appended.
///
/// # Examples
///
/// ```
/// use gios_reader::domain::index_level_key;
///
/// assert_eq!(index_level_key("PM2.5"), "pm25IndexLevel");
/// assert_eq!(index_level_key("NO2"), "no2IndexLevel");
/// ```
pub fn index_level_key(param_code: &str) -> String {
    let mut key: String = param_code
        .chars()
        .filter(|&c| c != '.')
        .flat_map(char::to_lowercase)
        .collect();
    key.push_str(INDEX_LEVEL_SUFFIX);
    key
}

/// Latest measurement of one pollutant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantReading {
    /// Sensor identifier.
    pub id: ApiId,
    /// Display name of the measured parameter.
    pub name: String,
    /// Latest usable value.
    pub value: f64,
    /// Lowercase qualitative index level, e.g. `"dobry"`.
    pub index: String,
}

/// The overall station index entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexReading {
    /// Always [`AQI_KEY`].
    pub name: String,
    /// Lowercase qualitative index level.
    pub value: String,
}

/// One entry of a [`StationReading`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReadingEntry {
    Pollutant(PollutantReading),
    Index(IndexReading),
}

/// Pollutant code → reading, plus the overall index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StationReading {
    entries: BTreeMap<String, ReadingEntry>,
}

impl StationReading {
    /// An empty reading (no data available).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a complete reading from every pollutant and the overall level.
    pub fn complete(
        pollutants: BTreeMap<String, PollutantReading>,
        overall_level: impl Into<String>,
    ) -> Self {
        let mut entries: BTreeMap<String, ReadingEntry> = pollutants
            .into_iter()
            .map(|(code, reading)| (code, ReadingEntry::Pollutant(reading)))
            .collect();
        entries.insert(
            AQI_KEY.to_string(),
            ReadingEntry::Index(IndexReading {
                name: AQI_KEY.to_string(),
                value: overall_level.into(),
            }),
        );
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries, including the overall index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&ReadingEntry> {
        self.entries.get(key)
    }

    /// Look up a pollutant by its code.
    pub fn pollutant(&self, param_code: &str) -> Option<&PollutantReading> {
        match self.entries.get(param_code)? {
            ReadingEntry::Pollutant(p) => Some(p),
            ReadingEntry::Index(_) => None,
        }
    }

    /// The overall index level, if the reading is populated.
    pub fn air_quality_index(&self) -> Option<&str> {
        match self.entries.get(AQI_KEY)? {
            ReadingEntry::Index(i) => Some(&i.value),
            ReadingEntry::Pollutant(_) => None,
        }
    }

    /// Iterate over pollutant entries in code order.
    pub fn pollutants(&self) -> impl Iterator<Item = (&str, &PollutantReading)> {
        self.entries.iter().filter_map(|(code, entry)| match entry {
            ReadingEntry::Pollutant(p) => Some((code.as_str(), p)),
            ReadingEntry::Index(_) => None,
        })
    }

    /// Iterate over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReadingEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
