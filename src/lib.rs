//! # gqlbind
//!
//! Client-side building blocks for GraphQL: a typed request model with a
//! serializer, a response envelope, and declarative binding of response data
//! onto Rust types.
//!
//! ## Overview
//!
//! This crate provides:
//! - A request model ([`Operation`], [`Field`], [`Variable`], [`Value`]) and
//!   a deterministic serializer to request text
//! - A literal formatter for argument values, including input objects,
//!   enums, lists and dates
//! - A response envelope ([`Response`]) that separates `data` from server
//!   [`errors`](ServerError)
//! - Typed extraction through per-type binding tables ([`Shape`],
//!   [`ShapeTable`])
//! - An optional async HTTP client with retry handling ([`GraphqlClient`])
//!
//! ## Building a Request
//!
//! ```rust
//! use gqlbind::{Field, Operation, Variable, VariableType};
//!
//! let person_id = Variable::new("personId", VariableType::named("Int").non_null());
//! let operation = Operation::query()
//!     .name("profile")
//!     .variable(person_id.clone())
//!     .field(
//!         Field::new("profile")
//!             .arg("personId", &person_id)
//!             .select(["id", "surname"]),
//!     );
//!
//! assert_eq!(
//!     operation.serialize().unwrap(),
//!     "query profile($personId: Int!) { profile(personId: $personId) { id surname } }"
//! );
//! ```
//!
//! ## Reading a Response
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gqlbind::{Response, Shape, ShapeTable};
//!
//! #[derive(Debug, Default)]
//! struct Profile {
//!     id: i64,
//!     surname: String,
//!     birth_date: Option<NaiveDate>,
//! }
//!
//! impl Shape for Profile {
//!     fn describe(table: &mut ShapeTable<Self>) {
//!         table
//!             .field("id", |p: &mut Self, v| p.id = v)
//!             .field("surname", |p: &mut Self, v| p.surname = v)
//!             .field("birthDate", |p: &mut Self, v| p.birth_date = v);
//!     }
//! }
//!
//! let response = Response::parse(
//!     r#"{"data": {"profile": {"id": 7, "surname": "Doe", "birthDate": "1990-04-01"}}}"#,
//! )
//! .unwrap();
//!
//! let profile: Profile = response.get_object("profile").unwrap();
//! assert_eq!(profile.id, 7);
//! assert_eq!(profile.birth_date, NaiveDate::from_ymd_opt(1990, 4, 1));
//! ```
//!
//! ## Sending Requests
//!
//! ```rust,ignore
//! use gqlbind::{ClientConfig, Endpoint, GraphqlClient};
//!
//! let config = ClientConfig::builder()
//!     .endpoint(Endpoint::new("https://api.example.com/graphql").unwrap())
//!     .bearer_token("secret")
//!     .build()
//!     .unwrap();
//!
//! let client = GraphqlClient::new(&config)?;
//! let response = client.query(&operation).await?;
//! if response.has_error() {
//!     for error in response.errors() {
//!         eprintln!("{error}");
//!     }
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: nothing is cached between calls except the
//!   binding tables a caller holds on to
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: the transport layer is designed for Tokio

pub mod clients;
pub mod config;
pub mod error;
pub mod request;
pub mod response;

// Re-export public types at crate root for convenience
pub use config::{ClientConfig, ClientConfigBuilder, Endpoint};
pub use error::{BuildError, ConfigError, ExtractError, ResponseError};

// Re-export request model types
pub use request::{
    Document, EnumValue, Field, InputObject, Operation, OperationType, Value, Variable,
    VariableType,
};

// Re-export response types
pub use response::{BindValue, Response, ServerError, Shape, ShapeTable};

// Re-export client types
pub use clients::{GraphqlClient, GraphqlError, GraphqlRequest, HttpClient, HttpError, Transport};
