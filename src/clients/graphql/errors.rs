//! Error type for executing GraphQL requests.
//!
//! Server-reported GraphQL errors are not failures of this layer. They come
//! back with HTTP 200 and are exposed through
//! [`Response::errors`](crate::Response::errors).
//!
//! - [`GraphqlError::Http`]: the request could not be delivered
//! - [`GraphqlError::Build`]: the operation could not be serialized
//! - [`GraphqlError::Response`]: the body is not a GraphQL response envelope
//!
//! # Example
//!
//! ```rust,ignore
//! use gqlbind::clients::graphql::GraphqlError;
//!
//! match client.query(&operation).await {
//!     Ok(response) if response.has_error() => {
//!         for error in response.errors() {
//!             println!("GraphQL error: {error}");
//!         }
//!     }
//!     Ok(response) => println!("data: {:?}", response.data()),
//!     Err(GraphqlError::Http(e)) => println!("HTTP error: {e}"),
//!     Err(e) => println!("other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::error::{BuildError, ResponseError};

/// Error type for GraphQL client operations.
///
/// # Example
///
/// ```rust
/// use gqlbind::clients::graphql::GraphqlError;
/// use gqlbind::clients::{HttpError, HttpResponseError};
///
/// let http_error = HttpError::Response(HttpResponseError {
///     code: 401,
///     message: r#"{"error":"Unauthorized"}"#.to_string(),
/// });
/// let graphql_error: GraphqlError = http_error.into();
/// assert!(graphql_error.to_string().contains("Unauthorized"));
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// Network errors, non-2xx responses and retry exhaustion.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The operation could not be rendered to request text.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The response body was not a valid GraphQL response.
    #[error(transparent)]
    Response(#[from] ResponseError),
}
