//! GIOS transport error types.

/// Errors that can occur when requesting data from the GIOS API.
#[derive(Debug, thiserror::Error)]
pub enum GiosError {
    /// HTTP request failed (connection error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status; carries the response body
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// API answered successfully but with nothing in it
    #[error("empty response from {path}")]
    Empty { path: String },
}

impl GiosError {
    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            GiosError::Api { status, .. } => Some(*status),
            GiosError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
