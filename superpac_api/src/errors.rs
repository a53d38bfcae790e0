//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    /// The upstream answered HTTP 429.
    #[error("Rate limited (HTTP 429)")]
    RateLimited,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The body could not be parsed into the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),
    /// The request URL could not be built from the base URL and path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Connection-level failure (DNS, refused connection, TLS, body read).
    #[error("Request failed: {0}")]
    RequestFailed(String),
}
