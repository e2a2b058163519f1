//! The narrow interface between the GraphQL client and its transport.

use std::future::Future;

use crate::clients::HttpError;

/// Sends an encoded request body and returns the raw response body.
///
/// [`HttpClient`](crate::clients::HttpClient) is the reqwest-backed
/// implementation. Tests and alternative transports implement this trait
/// directly.
///
/// # Example
///
/// ```rust
/// use gqlbind::clients::{HttpError, Transport};
///
/// struct Canned(&'static str);
///
/// impl Transport for Canned {
///     async fn send(&self, _body: String, _headers: &[(String, String)]) -> Result<Vec<u8>, HttpError> {
///         Ok(self.0.as_bytes().to_vec())
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends `body` with the given per-request `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the request cannot be delivered or the
    /// server answers with an error status.
    fn send(
        &self,
        body: String,
        headers: &[(String, String)],
    ) -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send;
}
