//! Service configuration loaded from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::ApiId;
use crate::gios::{DEFAULT_BASE_URL, GiosConfig};

/// Default refresh period: 30 minutes.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(1800);

/// Default address of the status server.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

const STATION_ID_VAR: &str = "GIOS_STATION_ID";
const BASE_URL_VAR: &str = "GIOS_BASE_URL";
const SCAN_INTERVAL_VAR: &str = "GIOS_SCAN_INTERVAL_SECS";
const TIMEOUT_VAR: &str = "GIOS_TIMEOUT_SECS";
const BIND_ADDR_VAR: &str = "GIOS_BIND_ADDR";

/// Errors from reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable is set to an unusable value
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Configuration of the monitoring service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Station to monitor.
    pub station_id: ApiId,
    /// API client settings.
    pub gios: GiosConfig,
    /// How often the reader refreshes.
    pub scan_interval: Duration,
    /// Address the status server listens on.
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of
    /// a variable if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let station_id = lookup(STATION_ID_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing(STATION_ID_VAR))?;

        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: BASE_URL_VAR,
                value: base_url,
                reason: "must be an http(s) URL",
            });
        }

        let scan_interval = match lookup(SCAN_INTERVAL_VAR) {
            Some(v) => Duration::from_secs(parse_positive_secs(SCAN_INTERVAL_VAR, v)?),
            None => DEFAULT_SCAN_INTERVAL,
        };

        let mut gios = GiosConfig::new().with_base_url(base_url);
        if let Some(v) = lookup(TIMEOUT_VAR) {
            gios = gios.with_timeout(parse_positive_secs(TIMEOUT_VAR, v)?);
        }

        let bind_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
            var: BIND_ADDR_VAR,
            value: bind_addr,
            reason: "must be host:port",
        })?;

        Ok(Self {
            station_id: ApiId::new(station_id),
            gios,
            scan_interval,
            bind_addr,
        })
    }
}

fn parse_positive_secs(var: &'static str, value: String) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::Invalid {
            var,
            value,
            reason: "must be a positive number of seconds",
        }),
    }
}
