//! Mock GIOS transport for testing without API access.
//!
//! Serves canned responses keyed by request path and records every
//! request it receives.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use super::client::Transport;
use super::error::GiosError;

/// A canned response.
#[derive(Debug, Clone)]
enum MockResponse {
    Body(String),
    Status { status: u16, body: String },
    Unreachable,
}

/// Mock transport that serves responses from memory.
///
/// Paths without a registered response answer with status 404, like an
/// unknown resource on the real API. Paths marked unreachable fail with
/// [`GiosError::Http`], like a refused connection.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, MockResponse>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Create a mock with no responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `value` as JSON at `path`.
    pub fn with_json(self, path: &str, value: Value) -> Self {
        self.set_json(path, value);
        self
    }

    /// Serve a raw body at `path`.
    pub fn with_body(self, path: &str, body: impl Into<String>) -> Self {
        self.responses()
            .insert(path.to_string(), MockResponse::Body(body.into()));
        self
    }

    /// Answer `path` with a non-success status.
    pub fn with_status(self, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.set_status(path, status, body);
        self
    }

    /// Fail requests for `path` without any HTTP response.
    pub fn with_unreachable(self, path: &str) -> Self {
        self.set_unreachable(path);
        self
    }

    /// Replace the response at `path` with `value`.
    pub fn set_json(&self, path: &str, value: Value) {
        self.responses()
            .insert(path.to_string(), MockResponse::Body(value.to_string()));
    }

    /// Replace the response at `path` with a non-success status.
    pub fn set_status(&self, path: &str, status: u16, body: impl Into<String>) {
        self.responses().insert(
            path.to_string(),
            MockResponse::Status {
                status,
                body: body.into(),
            },
        );
    }

    /// Make `path` fail without any HTTP response.
    pub fn set_unreachable(&self, path: &str) {
        self.responses()
            .insert(path.to_string(), MockResponse::Unreachable);
    }

    /// Number of requests made for `path`.
    pub fn request_count(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| *p == path).count()
    }

    /// All requested paths, in order.
    pub fn requested_paths(&self) -> Vec<String> {
        self.requests().clone()
    }

    fn responses(&self) -> MutexGuard<'_, HashMap<String, MockResponse>> {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn requests(&self) -> MutexGuard<'_, Vec<String>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond(&self, path: &str) -> Result<String, GiosError> {
        self.requests().push(path.to_string());

        match self.responses().get(path) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::Status { status, body }) => Err(GiosError::Api {
                status: *status,
                body: body.clone(),
            }),
            Some(MockResponse::Unreachable) => Err(connection_error(path)),
            None => Err(GiosError::Api {
                status: 404,
                body: format!("No mock data for {path}"),
            }),
        }
    }
}

/// A transport-level `reqwest` error for `path`.
///
/// `reqwest::Error` has no public constructor; a request to an unparsable
/// URL yields one without touching the network.
fn connection_error(path: &str) -> GiosError {
    match reqwest::Client::new().get(format!("http://[{path}")).build() {
        Err(e) => GiosError::Http(e),
        Ok(_) => unreachable!("bracketed host without a closing bracket parsed"),
    }
}

impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<String, GiosError> {
        self.respond(path)
    }
}
