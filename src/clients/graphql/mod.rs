//! GraphQL client over a pluggable transport.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: sends [`Operation`](crate::Operation)s or
//!   [`GraphqlRequest`](crate::clients::GraphqlRequest)s and parses the
//!   reply into a [`Response`](crate::Response)
//! - [`GraphqlError`]: error type for client operations
//!
//! # Example
//!
//! ```rust,ignore
//! use gqlbind::{ClientConfig, Endpoint, Field, GraphqlClient, Operation};
//!
//! let config = ClientConfig::builder()
//!     .endpoint(Endpoint::new("https://api.example.com/graphql").unwrap())
//!     .bearer_token("secret")
//!     .tries(3)
//!     .build()
//!     .unwrap();
//!
//! let client = GraphqlClient::new(&config)?;
//! let operation = Operation::query().field(Field::new("people").select(["id", "surname"]));
//!
//! let response = client.query(&operation).await?;
//! let people: Vec<Person> = response.get_list("people")?;
//! ```
//!
//! # Response Structure
//!
//! A reply carries `data`, `errors`, or both. Server-reported errors do not
//! fail the call: check [`Response::has_error`](crate::Response::has_error).
//!
//! # Retry Behavior
//!
//! With [`HttpClient`](crate::clients::HttpClient), 429 and 500 replies are
//! retried up to [`ClientConfig::tries`](crate::ClientConfig::tries) times.

mod client;
mod errors;

pub use client::GraphqlClient;
pub use errors::GraphqlError;
