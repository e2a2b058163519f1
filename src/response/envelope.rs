//! The response envelope: a data section plus structured server errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ExtractError, ResponseError};
use crate::response::extract::{extract_list, extract_object, extract_value};
use crate::response::logger::{NoopLogger, ResponseLogger};
use crate::response::shape::{BindValue, Shape};

/// A source location attached to a server error.
///
/// A member the server leaves out reads as `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Line number, starting at 1.
    #[serde(default)]
    pub line: u32,
    /// Column number, starting at 1.
    #[serde(default)]
    pub column: u32,
}

/// One segment of the `path` attached to a server error.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A response key.
    Key(String),
    /// A list index.
    Index(u64),
}

/// A structured error reported by the server in the `errors` member.
///
/// These are never raised as Rust errors. Inspect them through
/// [`Response::errors`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerError {
    /// The error message.
    pub message: String,
    /// Locations in the request text the error refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    /// Path to the response field that produced the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    /// Implementation-specific details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A parsed GraphQL response.
///
/// `data` is absent when the payload has no `data` member or when it is
/// `null`. Both data and errors may be present at once (partial success);
/// the envelope passes both through untouched.
///
/// # Example
///
/// ```rust
/// use gqlbind::Response;
///
/// let response: Response = r#"{"data": null, "errors": [{"message": "boom"}]}"#
///     .parse()
///     .unwrap();
///
/// assert!(!response.has_data());
/// assert!(response.has_error());
/// assert_eq!(response.errors()[0].message, "boom");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    data: Option<Map<String, Value>>,
    errors: Vec<ServerError>,
}

impl Response {
    /// Creates a response from already separated parts.
    #[must_use]
    pub const fn new(data: Option<Map<String, Value>>, errors: Vec<ServerError>) -> Self {
        Self { data, errors }
    }

    /// Parses a raw JSON payload without logging.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError`] if the payload is not a JSON object, if
    /// `data` is neither an object nor `null`, or if `errors` is malformed.
    pub fn parse(raw: &str) -> Result<Self, ResponseError> {
        Self::parse_with_logger(raw, &NoopLogger)
    }

    /// Parses a raw JSON payload, reporting diagnostics to `logger`.
    ///
    /// # Errors
    ///
    /// See [`Response::parse`].
    pub fn parse_with_logger(raw: &str, logger: &dyn ResponseLogger) -> Result<Self, ResponseError> {
        let payload = serde_json::from_str(raw).map_err(ResponseError::InvalidJson)?;
        Self::from_value(payload, logger)
    }

    /// Parses a raw JSON payload from bytes, reporting diagnostics to `logger`.
    ///
    /// # Errors
    ///
    /// See [`Response::parse`].
    pub fn from_slice(raw: &[u8], logger: &dyn ResponseLogger) -> Result<Self, ResponseError> {
        let payload = serde_json::from_slice(raw).map_err(ResponseError::InvalidJson)?;
        Self::from_value(payload, logger)
    }

    /// Wraps an already parsed JSON payload.
    ///
    /// # Errors
    ///
    /// See [`Response::parse`].
    pub fn from_value(payload: Value, logger: &dyn ResponseLogger) -> Result<Self, ResponseError> {
        logger.received(&payload);

        let Value::Object(mut payload) = payload else {
            return Err(ResponseError::NotAnObject {
                member: "response",
                found: kind(&payload),
            });
        };

        let data = match payload.remove("data") {
            None => None,
            Some(Value::Null) => {
                logger.no_data();
                None
            }
            Some(Value::Object(data)) => Some(data),
            Some(other) => {
                return Err(ResponseError::NotAnObject {
                    member: "data",
                    found: kind(&other),
                })
            }
        };

        let errors: Vec<ServerError> = match payload.remove("errors") {
            None | Some(Value::Null) => Vec::new(),
            Some(raw) => {
                let errors: Vec<ServerError> =
                    serde_json::from_value(raw).map_err(ResponseError::InvalidErrors)?;
                logger.errors_detected(errors.len());
                errors
            }
        };

        Ok(Self { data, errors })
    }

    /// Returns the data section, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref()
    }

    /// Returns the server errors in payload order.
    #[must_use]
    pub fn errors(&self) -> &[ServerError] {
        &self.errors
    }

    /// Returns `true` if the response carries a data section.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Returns `true` if the server reported at least one error.
    #[must_use]
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Consumes the response, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> (Option<Map<String, Value>>, Vec<ServerError>) {
        (self.data, self.errors)
    }

    /// Binds the object at `path` in the data section.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::FieldNotFound`] when there is no data section
    /// or the path is missing, and [`ExtractError::Conversion`] when binding
    /// fails.
    pub fn get_object<T: Shape>(&self, path: &str) -> Result<T, ExtractError> {
        extract_object(self.require_data(path)?, path)
    }

    /// Binds every object at `path` in the data section.
    ///
    /// # Errors
    ///
    /// See [`Response::get_object`].
    pub fn get_list<T: Shape>(&self, path: &str) -> Result<Vec<T>, ExtractError> {
        extract_list(self.require_data(path)?, path)
    }

    /// Converts the scalar value at `path` in the data section.
    ///
    /// # Errors
    ///
    /// See [`Response::get_object`].
    pub fn get_value<V: BindValue>(&self, path: &str) -> Result<V, ExtractError> {
        extract_value(self.require_data(path)?, path)
    }

    fn require_data(&self, path: &str) -> Result<&Map<String, Value>, ExtractError> {
        self.data.as_ref().ok_or_else(|| ExtractError::FieldNotFound {
            path: path.to_string(),
        })
    }
}

impl FromStr for Response {
    type Err = ResponseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        events: Mutex<Vec<String>>,
    }

    impl ResponseLogger for Recording {
        fn received(&self, payload: &Value) {
            self.events
                .lock()
                .unwrap()
                .push(format!("received {}", payload.is_object()));
        }

        fn no_data(&self) {
            self.events.lock().unwrap().push("no_data".to_string());
        }

        fn errors_detected(&self, count: usize) {
            self.events.lock().unwrap().push(format!("errors {count}"));
        }
    }

    #[test]
    fn test_data_only() {
        let response = Response::parse(r#"{"data": {"people": []}}"#).unwrap();
        assert!(response.has_data());
        assert!(!response.has_error());
        assert!(response.data().unwrap().contains_key("people"));
    }

    #[test]
    fn test_null_and_absent_data_are_equivalent() {
        let null = Response::parse(r#"{"data": null, "errors": [{"message": "x"}]}"#).unwrap();
        let absent = Response::parse(r#"{"errors": [{"message": "x"}]}"#).unwrap();
        assert_eq!(null, absent);
        assert!(!null.has_data());
    }

    #[test]
    fn test_errors_keep_order_and_structure() {
        let response = Response::parse(
            r#"{
                "data": null,
                "errors": [
                    {"message": "first", "locations": [{"line": 1, "column": 3}]},
                    {"message": "second", "path": ["people", 2, "surname"]},
                    {"message": "third", "extensions": {"code": "FORBIDDEN"}}
                ]
            }"#,
        )
        .unwrap();

        let errors = response.errors();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].message, "first");
        assert_eq!(errors[0].locations, Some(vec![Location { line: 1, column: 3 }]));
        assert_eq!(
            errors[1].path,
            Some(vec![
                PathSegment::Key("people".to_string()),
                PathSegment::Index(2),
                PathSegment::Key("surname".to_string()),
            ])
        );
        assert_eq!(
            errors[2].extensions.as_ref().unwrap()["code"],
            Value::String("FORBIDDEN".to_string())
        );
        assert_eq!(errors[2].to_string(), "third");
    }

    #[test]
    fn test_partial_response_passes_both_through() {
        let response =
            Response::parse(r#"{"data": {"a": 1}, "errors": [{"message": "b failed"}]}"#).unwrap();
        assert!(response.has_data());
        assert!(response.has_error());
    }

    #[test]
    fn test_invalid_payloads() {
        assert!(matches!(
            Response::parse("not json"),
            Err(ResponseError::InvalidJson(_))
        ));
        assert!(matches!(
            Response::parse("[1, 2]"),
            Err(ResponseError::NotAnObject {
                member: "response",
                found: "array"
            })
        ));
        assert!(matches!(
            Response::parse(r#"{"data": "oops"}"#),
            Err(ResponseError::NotAnObject {
                member: "data",
                found: "string"
            })
        ));
        assert!(matches!(
            Response::parse(r#"{"errors": [{"nomessage": true}]}"#),
            Err(ResponseError::InvalidErrors(_))
        ));
    }

    #[test]
    fn test_logger_receives_events() {
        let logger = Recording::default();
        Response::parse_with_logger(
            r#"{"data": null, "errors": [{"message": "a"}, {"message": "b"}]}"#,
            &logger,
        )
        .unwrap();

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec!["received true", "no_data", "errors 2"]
        );
    }

    #[test]
    fn test_logger_sees_empty_errors_member() {
        let logger = Recording::default();
        let response =
            Response::parse_with_logger(r#"{"data": {"a": 1}, "errors": []}"#, &logger).unwrap();

        assert!(!response.has_error());
        assert_eq!(
            *logger.events.lock().unwrap(),
            vec!["received true", "errors 0"]
        );
    }

    #[test]
    fn test_logger_silent_without_errors_member() {
        let logger = Recording::default();
        Response::parse_with_logger(r#"{"data": {"a": 1}, "errors": null}"#, &logger).unwrap();

        assert_eq!(*logger.events.lock().unwrap(), vec!["received true"]);
    }

    #[test]
    fn test_incomplete_location_keeps_error_list() {
        let response = Response::parse(
            r#"{"errors": [
                {"message": "first", "locations": [{"line": 4}]},
                {"message": "second", "locations": [{"column": 9}, {}]}
            ]}"#,
        )
        .unwrap();

        let errors = response.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].locations, Some(vec![Location { line: 4, column: 0 }]));
        assert_eq!(
            errors[1].locations,
            Some(vec![Location { line: 0, column: 9 }, Location::default()])
        );
    }

    #[test]
    fn test_get_object_without_data_is_not_found() {
        #[derive(Default)]
        struct Empty;
        impl Shape for Empty {
            fn describe(_table: &mut crate::response::ShapeTable<Self>) {}
        }

        let response = Response::parse(r#"{"errors": [{"message": "x"}]}"#).unwrap();
        assert!(matches!(
            response.get_object::<Empty>("anything"),
            Err(ExtractError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_from_slice_matches_parse() {
        let raw = r#"{"data": {"count": 4}}"#;
        let from_slice = Response::from_slice(raw.as_bytes(), &NoopLogger).unwrap();
        assert_eq!(from_slice, Response::parse(raw).unwrap());
        assert_eq!(from_slice.get_value::<i32>("count").unwrap(), 4);
    }
}
