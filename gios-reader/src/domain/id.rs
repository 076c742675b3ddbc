//! Identifier type shared by stations and sensors.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A GIOS station or sensor identifier.
///
/// The API sends identifiers as JSON integers, but a configured station ID
/// is free text. Both forms are held as their decimal string so that a
/// configured `"114"` matches a directory entry `114`.
///
/// # Examples
///
/// ```
/// use gios_reader::domain::ApiId;
///
/// let id: ApiId = serde_json::from_str("114").unwrap();
/// assert_eq!(id, ApiId::new("114"));
///
/// let id: ApiId = serde_json::from_str("\"aa01\"").unwrap();
/// assert_eq!(id.as_str(), "aa01");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ApiId(String);

impl ApiId {
    /// Wrap an identifier string as-is.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ApiId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ApiId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ApiId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Debug for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiId({})", self.0)
    }
}

impl fmt::Display for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire form of an identifier: a JSON number or a JSON string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for ApiId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(Self(n.to_string())),
            RawId::Text(s) => Ok(Self(s)),
        }
    }
}
