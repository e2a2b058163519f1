//! Argument values and their wire literals.
//!
//! [`Value`] is the closed set of things that can appear on the right-hand
//! side of an argument, an input object member, or a variable default.
//! [`format`] renders a value to GraphQL literal syntax.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::error::BuildError;
use crate::request::Variable;

/// A value usable as an argument, input object member, or variable default.
///
/// # Example
///
/// ```rust
/// use gqlbind::request::{format, EnumValue, InputObject, Value};
///
/// let filter = InputObject::new()
///     .field("surname", "Zemlak")
///     .field("order", EnumValue::new("ASC"))
///     .field("ids", vec![1, 2, 3]);
///
/// assert_eq!(
///     format(&Value::from(filter)).unwrap(),
///     r#"{surname: "Zemlak", order: ASC, ids: [1,2,3]}"#
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The `null` literal.
    Null,
    /// A reference to a declared variable, rendered as `$name`.
    Variable(String),
    /// A composite input literal.
    Object(InputObject),
    /// A bare enum identifier.
    Enum(EnumValue),
    /// A list literal.
    List(Vec<Value>),
    /// A string literal.
    String(String),
    /// A single character, rendered as a one-character string.
    Char(char),
    /// A calendar date, rendered as an ISO-8601 string.
    Date(NaiveDate),
    /// An integer literal.
    Int(i64),
    /// A float literal. Must be finite. Whole numbers keep a `.0` suffix.
    Float(f64),
    /// A boolean literal.
    Boolean(bool),
}

/// A bare enum identifier such as `ASC` or `ADMIN`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumValue(String);

impl EnumValue {
    /// Creates an enum value from its identifier.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    /// Returns the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An ordered input object literal.
///
/// Member order is insertion order. Setting a member that already exists
/// replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputObject {
    entries: Vec<(String, Value)>,
}

impl InputObject {
    /// Creates an empty input object.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds or replaces a member.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Adds or replaces a member in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Returns the value of a member, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    /// Returns the members in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the object has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders a value as a GraphQL literal.
///
/// # Errors
///
/// Returns [`BuildError::NonFiniteFloat`] for NaN or infinite floats, and
/// [`BuildError::EmptyName`] for a variable reference, enum value, or input
/// object member with an empty name.
///
/// # Example
///
/// ```rust
/// use gqlbind::request::{format, Value};
///
/// assert_eq!(format(&Value::from("say \"hi\"\n")).unwrap(), r#""say \"hi\"\n""#);
/// assert_eq!(format(&Value::from(vec![true, false])).unwrap(), "[true,false]");
/// assert_eq!(format(&Value::Null).unwrap(), "null");
/// ```
pub fn format(value: &Value) -> Result<String, BuildError> {
    let mut out = String::new();
    write_value(&mut out, value)?;
    Ok(out)
}

pub(crate) fn write_value(out: &mut String, value: &Value) -> Result<(), BuildError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Variable(name) => {
            if name.is_empty() {
                return Err(BuildError::EmptyName { kind: "variable" });
            }
            out.push('$');
            out.push_str(name);
        }
        Value::Object(object) => {
            out.push('{');
            for (i, (name, member)) in object.entries().enumerate() {
                if name.is_empty() {
                    return Err(BuildError::EmptyName {
                        kind: "input field",
                    });
                }
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(name);
                out.push_str(": ");
                write_value(out, member)?;
            }
            out.push('}');
        }
        Value::Enum(identifier) => {
            if identifier.0.is_empty() {
                return Err(BuildError::EmptyName { kind: "enum value" });
            }
            out.push_str(&identifier.0);
        }
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        Value::String(s) => write_quoted(out, s),
        Value::Char(c) => write_quoted(out, c.encode_utf8(&mut [0; 4])),
        Value::Date(date) => write_quoted(out, &date.format("%Y-%m-%d").to_string()),
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(BuildError::NonFiniteFloat {
                    value: f.to_string(),
                });
            }
            // Debug keeps the fraction, so 2.0 stays a float literal.
            let _ = write!(out, "{f:?}");
        }
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
    }
    Ok(())
}

/// Quotes and escapes a string for use as a GraphQL string literal.
///
/// `"` and `\` are backslash-escaped, carriage return and line feed become
/// `\r` and `\n`, and any other control character below `0x20` becomes a
/// `\uXXXX` escape.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    write_quoted(&mut out, value);
    out
}

fn write_quoted(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<InputObject> for Value {
    fn from(value: InputObject) -> Self {
        Self::Object(value)
    }
}

impl From<&Variable> for Value {
    fn from(value: &Variable) -> Self {
        Self::Variable(value.name().to_string())
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
