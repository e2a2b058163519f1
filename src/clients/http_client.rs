//! reqwest-backed transport.

use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::Transport;
use crate::config::ClientConfig;

/// Fixed retry wait time in seconds when no `Retry-After` header is present.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport that POSTs request bodies to a GraphQL endpoint.
///
/// The client handles:
/// - Default headers (User-Agent, Accept, Content-Type, configured headers)
/// - Per-request extra headers
/// - Retries on 429 and 500 responses, up to [`ClientConfig::tries`]
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use gqlbind::{ClientConfig, Endpoint};
/// use gqlbind::clients::{HttpClient, Transport};
///
/// let config = ClientConfig::builder()
///     .endpoint(Endpoint::new("https://api.example.com/graphql").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config)?;
/// let raw = client.send(r#"{"query":"{ people { id } }"}"#.to_string(), &[]).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    endpoint: String,
    default_headers: Vec<(String, String)>,
    tries: u32,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g. TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("{user_agent_prefix}gqlbind v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = vec![
            ("User-Agent".to_string(), user_agent),
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        for (name, value) in config.headers() {
            merge_header(&mut default_headers, name, value);
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint().to_string(),
            default_headers,
            tries: config.tries(),
        })
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    /// Returns the maximum number of attempts per request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    async fn post(&self, body: String, headers: &[(String, String)]) -> Result<Vec<u8>, HttpError> {
        let mut merged = self.default_headers.clone();
        for (name, value) in headers {
            merge_header(&mut merged, name, value);
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!("POST {} (attempt {}/{})", self.endpoint, tries, self.tries);

            let mut request = self.client.post(&self.endpoint).body(body.clone());
            for (name, value) in &merged {
                request = request.header(name, value);
            }

            let res = request.send().await?;
            let code = res.status().as_u16();
            let retry_after = res
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<f64>().ok());
            let bytes = res.bytes().await?;

            if (200..300).contains(&code) {
                return Ok(bytes.to_vec());
            }

            let message = String::from_utf8_lossy(&bytes).into_owned();
            if code != 429 && code != 500 {
                return Err(HttpResponseError { code, message }.into());
            }
            if tries >= self.tries {
                if self.tries == 1 {
                    return Err(HttpResponseError { code, message }.into());
                }
                return Err(MaxHttpRetriesExceededError {
                    code,
                    tries: self.tries,
                    message,
                }
                .into());
            }

            let delay = retry_delay(code, retry_after);
            tracing::warn!(
                "GraphQL endpoint answered {}, retrying in {:?}",
                code,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}

impl Transport for HttpClient {
    async fn send(&self, body: String, headers: &[(String, String)]) -> Result<Vec<u8>, HttpError> {
        self.post(body, headers).await
    }
}

/// Inserts a header, replacing any existing header with the same name.
fn merge_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}

/// For 429, honours `Retry-After` when it is a representable number of
/// seconds. For 500, always waits the fixed delay.
fn retry_delay(status: u16, retry_after: Option<f64>) -> Duration {
    let fixed = Duration::from_secs(RETRY_WAIT_TIME);
    if status != 429 {
        return fixed;
    }
    retry_after
        .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
        .unwrap_or(fixed)
}
