//! Diagnostics emitted while a response envelope is being built.
//!
//! The envelope never logs on its own. Callers that want diagnostics pass a
//! [`ResponseLogger`] to [`Response::parse_with_logger`](crate::response::Response::parse_with_logger).

use serde_json::Value;

/// Maximum number of characters of a payload included in a log preview.
pub const MAX_PREVIEW_LENGTH: usize = 128;

/// Receives diagnostics while a response is parsed.
///
/// Every method has an empty default, so implementors only override the
/// events they care about.
pub trait ResponseLogger: Send + Sync {
    /// A payload was parsed.
    fn received(&self, _payload: &Value) {}

    /// The payload has a `data` member set to `null`.
    fn no_data(&self) {}

    /// The payload has a non-null `errors` member with `count` entries.
    ///
    /// Called whenever the member is present, so `count` may be `0`.
    fn errors_detected(&self, _count: usize) {}
}

/// A logger that discards everything. The default for envelope parsing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl ResponseLogger for NoopLogger {}

/// A logger that forwards diagnostics to `tracing`.
///
/// The payload preview and an empty errors list are logged at `debug`;
/// missing data and server errors at `warn`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl ResponseLogger for TracingLogger {
    fn received(&self, payload: &Value) {
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!("Received GraphQL response: {}", preview(&payload.to_string()));
        }
    }

    fn no_data(&self) {
        tracing::warn!("No data in GraphQL response");
    }

    fn errors_detected(&self, count: usize) {
        if count == 0 {
            tracing::debug!("GraphQL response carries an empty errors list");
        } else {
            tracing::warn!("GraphQL response carries {} error(s)", count);
        }
    }
}

/// Truncates `raw` to [`MAX_PREVIEW_LENGTH`] characters, appending ` etc...`
/// when anything was cut.
#[must_use]
pub fn preview(raw: &str) -> String {
    match raw.char_indices().nth(MAX_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{} etc...", &raw[..cut]),
        None => raw.to_string(),
    }
}
