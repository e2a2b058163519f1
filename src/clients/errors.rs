//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: the server answered with a non-2xx status
//! - [`MaxHttpRetriesExceededError`]: 429/500 responses outlasted the configured tries
//! - [`HttpError`]: unified error type for the transport layer
//!
//! # Example
//!
//! ```rust,ignore
//! use gqlbind::clients::{HttpError, Transport};
//!
//! match client.send(body, &[]).await {
//!     Ok(bytes) => println!("{} bytes", bytes.len()),
//!     Err(HttpError::Response(e)) => println!("HTTP {}: {}", e.code, e.message),
//!     Err(HttpError::MaxRetries(e)) => println!("gave up after {} tries", e.tries),
//!     Err(HttpError::Network(e)) => println!("network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the server answers with a non-successful status.
///
/// # Example
///
/// ```rust
/// use gqlbind::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Not Found".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 404: Not Found");
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, or the status reason when the body is empty.
    pub message: String,
}

/// Error returned when maximum retry attempts have been exhausted.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// The body of the last response.
    pub message: String,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
