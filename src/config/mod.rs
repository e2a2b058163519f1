//! Configuration types for the GraphQL client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: endpoint and connection settings for [`HttpClient`](crate::clients::HttpClient)
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`] instances
//! - [`Endpoint`]: a validated endpoint URL
//!
//! Only transport code reads this configuration. Building requests and
//! binding responses need no configuration at all.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use gqlbind::{ClientConfig, Endpoint};
//!
//! let config = ClientConfig::builder()
//!     .endpoint(Endpoint::new("https://api.example.com/graphql").unwrap())
//!     .bearer_token("secret-token")
//!     .timeout(Duration::from_secs(5))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint().host_name(), "api.example.com");
//! ```

mod newtypes;

use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};

pub use newtypes::Endpoint;

use crate::error::ConfigError;

/// Connection settings for the HTTP transport.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    endpoint: Endpoint,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    tries: u32,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the headers sent with every request, in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns how many attempts are made for a request that receives a
    /// 429 or 500 response. `1` means no retries.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `endpoint` is required. Everything else is optional.
///
/// # Defaults
///
/// - `headers`: none
/// - `timeout`: none (reqwest default)
/// - `tries`: 1 (no retries)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    endpoint: Option<Endpoint>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    tries: Option<u32>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint (required).
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Adds a header sent with every request. A later header with the same
    /// name (case-insensitive) replaces the earlier one.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value));
        self
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn bearer_token(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.header("Authorization", value)
    }

    /// Sets the overall request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the number of attempts for requests answered with 429 or 500.
    /// Values below 1 are treated as 1.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `endpoint` is not
    /// set, and [`ConfigError::InvalidHeader`] if a header name or value
    /// would be rejected by the HTTP transport.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .ok_or(ConfigError::MissingRequiredField { field: "endpoint" })?;

        for (name, value) in &self.headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err()
                || HeaderValue::from_str(value).is_err()
            {
                return Err(ConfigError::InvalidHeader { name: name.clone() });
            }
        }

        Ok(ClientConfig {
            endpoint,
            headers: self.headers,
            timeout: self.timeout,
            tries: self.tries.unwrap_or(1).max(1),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
