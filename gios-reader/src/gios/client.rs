//! GIOS HTTP transport.
//!
//! [`Transport`] is the seam between the station reader and the network:
//! it performs one GET against a path under the API root and hands back the
//! body of a successful response. [`GiosClient`] is the reqwest-backed
//! implementation.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::GiosError;

/// Default base URL of the GIOS `pjp-api` REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.gios.gov.pl/pjp-api/rest";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Performs GET requests against the GIOS API.
///
/// Implementations return the response body for a success status, and an
/// error for a non-success status or a connection failure.
pub trait Transport: Send + Sync {
    /// GET `path` (relative to the API root, starting with `/`).
    fn get(&self, path: &str) -> impl Future<Output = Result<String, GiosError>> + Send;
}

/// Configuration for the GIOS client.
#[derive(Debug, Clone)]
pub struct GiosConfig {
    /// Base URL for the API (defaults to production GIOS)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GiosConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    ///
    /// A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GiosConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// GIOS API client.
#[derive(Debug, Clone)]
pub struct GiosClient {
    http: reqwest::Client,
    base_url: String,
}

impl GiosClient {
    /// Create a new GIOS client with the given configuration.
    pub fn new(config: GiosConfig) -> Result<Self, GiosError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for GiosClient {
    async fn get(&self, path: &str) -> Result<String, GiosError> {
        let url = self.url(path);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "invalid response from GIOS API");
            let body = response.text().await.unwrap_or_default();
            return Err(GiosError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!(%url, status = status.as_u16(), "data retrieved");

        Ok(body)
    }
}
