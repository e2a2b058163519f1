//! Error types for request building, response parsing, and extraction.
//!
//! # Error Handling
//!
//! Each stage of a round-trip has its own error type:
//!
//! - [`BuildError`]: a request model could not be rendered to wire text
//! - [`ResponseError`]: a raw payload could not be wrapped into a
//!   [`Response`](crate::response::Response)
//! - [`ExtractError`]: a field path was missing from the data section, or a
//!   JSON value could not be coerced into the target shape
//! - [`ConfigError`]: client configuration failed validation
//!
//! GraphQL errors reported by the server are *not* represented here. They are
//! part of a successful [`Response`](crate::response::Response) and must be
//! inspected with [`Response::has_error`](crate::response::Response::has_error).
//!
//! # Example
//!
//! ```rust
//! use gqlbind::{Operation, BuildError};
//!
//! let result = Operation::query().serialize();
//! assert!(matches!(result, Err(BuildError::EmptySelection)));
//! ```

use thiserror::Error;

/// Errors raised while rendering a request model to wire text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A float value was NaN or infinite and has no literal form.
    #[error("Cannot format non-finite float '{value}'. GraphQL has no literal for NaN or infinity.")]
    NonFiniteFloat {
        /// The textual form of the offending value.
        value: String,
    },

    /// The operation has no fields to select.
    #[error("Operation has an empty selection set. At least one field is required.")]
    EmptySelection,

    /// Two variables with the same name were declared on one operation.
    #[error("Variable '${name}' is declared more than once.")]
    DuplicateVariable {
        /// The duplicated variable name.
        name: String,
    },

    /// A field, variable, argument, or enum value has an empty name.
    #[error("Empty {kind} name.")]
    EmptyName {
        /// What kind of element had the empty name.
        kind: &'static str,
    },
}

/// Errors raised while wrapping a raw JSON payload into a response envelope.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The payload is not valid JSON.
    #[error("Invalid JSON response: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The payload, or its `data` member, is valid JSON but not an object.
    #[error("GraphQL {member} must be a JSON object, got {found}.")]
    NotAnObject {
        /// Which part of the payload was malformed: `response` or `data`.
        member: &'static str,
        /// The JSON kind found instead.
        found: &'static str,
    },

    /// The `errors` member could not be read as a list of error entries.
    #[error("Malformed 'errors' member: {0}")]
    InvalidErrors(#[source] serde_json::Error),
}

/// Errors raised while binding response data onto a target shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The requested field path is absent from the data section.
    #[error("Field '{path}' not found in response data.")]
    FieldNotFound {
        /// The path that was looked up.
        path: String,
    },

    /// A JSON value could not be coerced into the declared field kind.
    #[error("Cannot convert field '{path}': expected {expected}, found {found}.")]
    Conversion {
        /// The full path of the offending field, e.g. `people[3].birthDate`.
        path: String,
        /// The kind the target shape declares.
        expected: String,
        /// A short description of what the JSON held instead.
        found: String,
    },
}

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The endpoint URL is not a valid `http` or `https` URL.
    #[error("Invalid endpoint '{url}'. Expected an absolute http(s) URL such as 'https://api.example.com/graphql'.")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A default header name or value is not valid in HTTP.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
