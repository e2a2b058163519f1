//! The JSON request body sent to a GraphQL endpoint.

use serde_json::{json, Map, Value};

use crate::error::BuildError;
use crate::request::{Document, Operation};

/// A GraphQL request ready to be posted: query text, variables and an
/// optional operation name.
///
/// Encodes as `{"query": ..., "variables": {...}, "operationName": ...}`.
/// `variables` is omitted when empty and `operationName` when unset.
///
/// # Example
///
/// ```rust
/// use gqlbind::{Field, Operation, Variable, VariableType};
/// use gqlbind::clients::GraphqlRequest;
///
/// let id = Variable::new("personId", VariableType::named("Int").non_null());
/// let operation = Operation::query()
///     .name("profile")
///     .variable(id.clone())
///     .field(Field::new("profile").arg("personId", &id).select(["id"]));
///
/// let request = GraphqlRequest::from_operation(&operation)
///     .unwrap()
///     .variable("personId", 7);
///
/// let body: serde_json::Value = serde_json::from_str(&request.to_body()).unwrap();
/// assert_eq!(body["variables"]["personId"], 7);
/// assert_eq!(body["operationName"], "profile");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphqlRequest {
    query: String,
    variables: Map<String, Value>,
    operation_name: Option<String>,
}

impl GraphqlRequest {
    /// Creates a request from already-serialized query text.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Serializes `operation` and names the request after it, if named.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the operation cannot be serialized.
    pub fn from_operation(operation: &Operation) -> Result<Self, BuildError> {
        let mut request = Self::new(operation.serialize()?);
        request.operation_name = operation.operation_name().map(str::to_string);
        Ok(request)
    }

    /// Serializes every operation in `document`. Use
    /// [`operation_name`](Self::operation_name) to pick which one the server
    /// executes when there are several.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the document is empty or an operation
    /// cannot be serialized.
    pub fn from_document(document: &Document) -> Result<Self, BuildError> {
        Ok(Self::new(document.serialize()?))
    }

    /// Sets a variable value, replacing any previous value with that name.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_variable(name, value);
        self
    }

    /// Sets a variable value in place.
    pub fn add_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Sets the operation name.
    #[must_use]
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Returns the query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the variable values.
    #[must_use]
    pub const fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// Returns the operation name, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Encodes the request as a JSON body.
    #[must_use]
    pub fn to_body(&self) -> String {
        let mut body = json!({ "query": self.query });
        if !self.variables.is_empty() {
            body["variables"] = Value::Object(self.variables.clone());
        }
        if let Some(name) = &self.operation_name {
            body["operationName"] = Value::String(name.clone());
        }
        body.to_string()
    }
}

impl From<String> for GraphqlRequest {
    fn from(query: String) -> Self {
        Self::new(query)
    }
}

impl From<&str> for GraphqlRequest {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}
