//! Transport layer for sending GraphQL requests.
//!
//! Nothing in [`request`](crate::request) or [`response`](crate::response)
//! depends on this module. It exists to move bodies between them and a
//! server.
//!
//! # Overview
//!
//! - [`Transport`]: the send-bytes-get-bytes seam
//! - [`HttpClient`]: reqwest-backed [`Transport`]
//! - [`GraphqlRequest`]: the JSON request body
//! - [`graphql::GraphqlClient`]: sends operations and parses responses
//! - [`graphql::GraphqlError`]: error type for client operations
//!
//! # Example
//!
//! ```rust,ignore
//! use gqlbind::{ClientConfig, Endpoint, GraphqlClient, GraphqlRequest};
//!
//! let config = ClientConfig::builder()
//!     .endpoint(Endpoint::new("https://api.example.com/graphql").unwrap())
//!     .build()
//!     .unwrap();
//! let client = GraphqlClient::new(&config)?;
//!
//! let response = client
//!     .execute(&GraphqlRequest::new("query profile($id: Int!) { profile(personId: $id) { id } }")
//!         .variable("id", 7))
//!     .await?;
//! ```
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **500 (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Configure via
//! [`ClientConfigBuilder::tries`](crate::ClientConfigBuilder::tries).

mod errors;
pub mod graphql;
mod graphql_request;
mod http_client;
mod transport;

pub use errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
pub use graphql_request::GraphqlRequest;
pub use http_client::{HttpClient, SDK_VERSION};
pub use transport::Transport;

pub use graphql::{GraphqlClient, GraphqlError};
