//! Validated newtype wrappers for configuration values.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// A validated GraphQL endpoint URL.
///
/// Must be an absolute `http` or `https` URL with a non-empty host.
///
/// # Example
///
/// ```rust
/// use gqlbind::Endpoint;
///
/// let endpoint = Endpoint::new("https://api.example.com/graphql").unwrap();
/// assert_eq!(endpoint.scheme(), "https");
/// assert_eq!(endpoint.host_name(), "api.example.com");
///
/// assert!(Endpoint::new("ftp://api.example.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    url: String,
    scheme_end: usize,
}

impl Endpoint {
    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL has no `http` or
    /// `https` scheme, has an empty host, or contains whitespace.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let invalid = || ConfigError::InvalidEndpoint { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }
        if url.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        let endpoint = Self { url, scheme_end };
        if endpoint.host_name().is_empty() {
            return Err(ConfigError::InvalidEndpoint { url: endpoint.url });
        }
        Ok(endpoint)
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host, without port or path.
    #[must_use]
    pub fn host_name(&self) -> &str {
        let rest = &self.url[self.scheme_end + 3..];
        let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
        authority.split(':').next().unwrap_or_default()
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        Self::new(url).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_endpoints() {
        let endpoint = Endpoint::new("http://localhost:8080/graphql").unwrap();
        assert_eq!(endpoint.scheme(), "http");
        assert_eq!(endpoint.host_name(), "localhost");
        assert_eq!(endpoint.as_ref(), "http://localhost:8080/graphql");

        let bare = Endpoint::new("https://example.com").unwrap();
        assert_eq!(bare.host_name(), "example.com");
    }

    #[test]
    fn test_invalid_endpoints() {
        for url in [
            "",
            "example.com/graphql",
            "ftp://example.com",
            "https://",
            "https:///graphql",
            "https://exa mple.com",
        ] {
            assert!(
                matches!(Endpoint::new(url), Err(ConfigError::InvalidEndpoint { .. })),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let endpoint: Endpoint = serde_json::from_str("\"https://api.example.com/graphql\"").unwrap();
        assert_eq!(
            serde_json::to_string(&endpoint).unwrap(),
            "\"https://api.example.com/graphql\""
        );
        assert!(serde_json::from_str::<Endpoint>("\"nope\"").is_err());
    }
}
