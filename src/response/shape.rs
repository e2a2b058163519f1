//! Declarative binding tables that map JSON members onto Rust types.
//!
//! A target type implements [`Shape`] by describing its fields once in a
//! [`ShapeTable`]: member name, expected kind, and setter. Binding a JSON
//! object walks the table, looks each declared name up in the object, and
//! converts the value through [`BindValue`].
//!
//! Members present in the JSON but absent from the table are ignored.
//! Declared fields absent from the JSON keep the value from
//! [`Default::default`].

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::Value;

use crate::error::ExtractError;
use crate::response::extract::FieldPath;

/// Date pattern used for [`NaiveDate`] fields unless a field overrides it.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A type that can be bound from a JSON object.
///
/// # Example
///
/// ```rust
/// use gqlbind::response::{Shape, ShapeTable};
///
/// #[derive(Debug, Default)]
/// struct Address {
///     code: String,
///     lines: Vec<String>,
/// }
///
/// impl Shape for Address {
///     fn describe(table: &mut ShapeTable<Self>) {
///         table
///             .field("code", |a: &mut Self, v| a.code = v)
///             .field("lines", |a: &mut Self, v| a.lines = v);
///     }
/// }
/// ```
pub trait Shape: Default + 'static {
    /// Registers every bindable field of this type.
    fn describe(table: &mut ShapeTable<Self>);
}

/// Conversion from a single JSON value to a Rust value.
///
/// Implemented for strings, integers, floats, booleans, `char`, dates,
/// `Option<T>`, `Vec<T>`, and [`serde_json::Value`]. Implement it for custom
/// scalars.
pub trait BindValue: Sized {
    /// Describes the accepted JSON form, used in conversion errors.
    fn expected() -> String;

    /// Converts a non-null JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Conversion`] when the value has the wrong kind
    /// or cannot be parsed.
    fn bind(value: &Value, path: &FieldPath) -> Result<Self, ExtractError>;

    /// The value to assign when the JSON holds `null`.
    ///
    /// `None` leaves the target field at its default.
    fn from_null() -> Option<Self> {
        None
    }
}

type BindFn<T> = Box<dyn Fn(&mut T, &Value, &FieldPath) -> Result<(), ExtractError> + Send + Sync>;

struct Binding<T> {
    name: String,
    expected: String,
    bind: BindFn<T>,
}

/// The binding table for one [`Shape`].
///
/// Built once per extraction and reused for every element of a list.
/// Nested shape tables are built lazily on first use, so recursive shapes
/// are supported.
pub struct ShapeTable<T> {
    bindings: Vec<Binding<T>>,
}

impl<T: Shape> ShapeTable<T> {
    /// Builds the table by calling [`Shape::describe`].
    #[must_use]
    pub fn build() -> Self {
        let mut table = Self {
            bindings: Vec::new(),
        };
        T::describe(&mut table);
        table
    }

    /// Binds a JSON object to a fresh `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Conversion`] when `value` is not an object or
    /// when any declared member fails to convert.
    pub fn bind(&self, value: &Value, path: &FieldPath) -> Result<T, ExtractError> {
        let Some(object) = value.as_object() else {
            return Err(conversion(path, "object", value));
        };
        let mut target = T::default();
        for binding in &self.bindings {
            if let Some(member) = object.get(&binding.name) {
                (binding.bind)(&mut target, member, &path.key(&binding.name))?;
            }
        }
        Ok(target)
    }
}

impl<T: 'static> ShapeTable<T> {
    /// Declares a field converted through [`BindValue`].
    ///
    /// A JSON `null` leaves the field at its default, except for `Option`
    /// fields which receive `None`.
    pub fn field<V, F>(&mut self, name: impl Into<String>, setter: F) -> &mut Self
    where
        V: BindValue,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push(name.into(), V::expected(), move |target, value, path| {
            if value.is_null() {
                if let Some(v) = V::from_null() {
                    setter(target, v);
                }
                return Ok(());
            }
            setter(target, V::bind(value, path)?);
            Ok(())
        })
    }

    /// Declares a date field parsed with a custom `chrono` pattern.
    pub fn date_with_format<F>(
        &mut self,
        name: impl Into<String>,
        format: &'static str,
        setter: F,
    ) -> &mut Self
    where
        F: Fn(&mut T, NaiveDate) + Send + Sync + 'static,
    {
        let expected = format!("date ({format})");
        self.push(name.into(), expected.clone(), move |target, value, path| {
            if value.is_null() {
                return Ok(());
            }
            let date = value
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s, format).ok())
                .ok_or_else(|| conversion(path, &expected, value))?;
            setter(target, date);
            Ok(())
        })
    }

    /// Declares an enum field parsed from its JSON string via [`FromStr`].
    pub fn enumeration<E, F>(&mut self, name: impl Into<String>, setter: F) -> &mut Self
    where
        E: FromStr,
        F: Fn(&mut T, E) + Send + Sync + 'static,
    {
        self.push(name.into(), "enum value".to_string(), move |target, value, path| {
            if value.is_null() {
                return Ok(());
            }
            let parsed = value
                .as_str()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| conversion(path, "enum value", value))?;
            setter(target, parsed);
            Ok(())
        })
    }

    /// Declares a nested object field.
    pub fn object<S, F>(&mut self, name: impl Into<String>, setter: F) -> &mut Self
    where
        S: Shape,
        F: Fn(&mut T, S) + Send + Sync + 'static,
    {
        let nested: OnceLock<ShapeTable<S>> = OnceLock::new();
        self.push(name.into(), "object".to_string(), move |target, value, path| {
            if value.is_null() {
                return Ok(());
            }
            let table = nested.get_or_init(ShapeTable::build);
            setter(target, table.bind(value, path)?);
            Ok(())
        })
    }

    /// Declares a list-of-objects field.
    pub fn objects<S, F>(&mut self, name: impl Into<String>, setter: F) -> &mut Self
    where
        S: Shape,
        F: Fn(&mut T, Vec<S>) + Send + Sync + 'static,
    {
        let nested: OnceLock<ShapeTable<S>> = OnceLock::new();
        self.push(
            name.into(),
            "list of objects".to_string(),
            move |target, value, path| {
                if value.is_null() {
                    return Ok(());
                }
                let Some(items) = value.as_array() else {
                    return Err(conversion(path, "list of objects", value));
                };
                let table = nested.get_or_init(ShapeTable::build);
                let bound = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| table.bind(item, &path.index(i)))
                    .collect::<Result<Vec<_>, _>>()?;
                setter(target, bound);
                Ok(())
            },
        )
    }

    /// Returns the declared member names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.name.as_str())
    }

    /// Returns the expected kind of a declared member.
    #[must_use]
    pub fn expected(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.expected.as_str())
    }

    fn push(
        &mut self,
        name: String,
        expected: String,
        bind: impl Fn(&mut T, &Value, &FieldPath) -> Result<(), ExtractError> + Send + Sync + 'static,
    ) -> &mut Self {
        self.bindings.push(Binding {
            name,
            expected,
            bind: Box::new(bind),
        });
        self
    }
}

impl<T> std::fmt::Debug for ShapeTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.bindings.iter().map(|b| (&b.name, &b.expected)))
            .finish()
    }
}

/// Builds a conversion error for `value` at `path`.
#[must_use]
pub fn conversion(path: &FieldPath, expected: &str, value: &Value) -> ExtractError {
    ExtractError::Conversion {
        path: path.to_string(),
        expected: expected.to_string(),
        found: describe(value),
    }
}

/// Short human-readable description of a JSON value for error messages.
fn describe(value: &Value) -> String {
    const MAX: usize = 32;
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) if s.chars().count() > MAX => {
            let head: String = s.chars().take(MAX).collect();
            format!("string \"{head}...\"")
        }
        Value::String(s) => format!("string \"{s}\""),
        Value::Array(items) => format!("list of {} elements", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

impl BindValue for String {
    fn expected() -> String {
        "string".to_string()
    }

    fn bind(value: &Value, path: &FieldPath) -> Result<Self, ExtractError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(conversion(path, "string", other)),
        }
    }
}

impl BindValue for bool {
    fn expected() -> String {
        "boolean".to_string()
    }

    fn bind(value: &Value, path: &FieldPath) -> Result<Self, ExtractError> {
        value
            .as_bool()
            .ok_or_else(|| conversion(path, "boolean", value))
    }
}

impl BindValue for char {
    fn expected() -> String {
        "single character".to_string()
    }

    fn bind(value: &Value, path: &FieldPath) -> Result<Self, ExtractError> {
        let mut chars = value.as_str().map(str::chars);
        match chars.as_mut().map(|c| (c.next(), c.next())) {
            Some((Some(c), None)) => Ok(c),
            _ => Err(conversion(path, "single character", value)),
        }
    }
}

macro_rules! impl_bind_integer {
    ($($ty:ty),*) => {
        $(
            impl BindValue for $ty {
                fn expected() -> String {
                    stringify!($ty).to_string()
                }

                fn bind(value: &Value, path: &FieldPath) -> Result<Self, ExtractError> {
                    let parsed = match value {
                        Value::Number(n) => n
                            .as_i64()
                            .and_then(|i| <$ty>::try_from(i).ok())
                            .or_else(|| n.as_u64().and_then(|u| <$ty>::try_from(u).ok())),
                        Value::String(s) => s.trim().parse::<$ty>().ok(),
                        _ => None,
                    };
                    parsed.ok_or_else(|| conversion(path, stringify!($ty), value))
                }
            }
        )*
    };
}

impl_bind_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

macro_rules! impl_bind_float {
    ($($ty:ty),*) => {
        $(
            impl BindValue for $ty {
                fn expected() -> String {
                    stringify!($ty).to_string()
                }

                #[allow(clippy::cast_possible_truncation)]
                fn bind(value: &Value, path: &FieldPath) -> Result<Self, ExtractError> {
                    let parsed = match value {
                        Value::Number(n) => n.as_f64().map(|f| f as $ty),
                        Value::String(s) => s.trim().parse::<$ty>().ok(),
                        _ => None,
                    };
                    parsed.ok_or_else(|| conversion(path, stringify!($ty), value))
                }
            }
        )*
    };
}

impl_bind_float!(f32, f64);

impl BindValue for NaiveDate {
    fn expected() -> String {
        format!("date ({DEFAULT_DATE_FORMAT})")
    }

    fn bind(value: &Value, path: &FieldPath) -> Result<Self, ExtractError> {
        value
            .as_str()
            .and_then(|s| Self::parse_from_str(s, DEFAULT_DATE_FORMAT).ok())
            .ok_or_else(|| conversion(path, &Self::expected(), value))
    }
}

impl BindValue for DateTime<FixedOffset> {
    fn expected() -> String {
        "RFC 3339 date-time".to_string()
    }

    fn bind(value: &Value, path: &FieldPath) -> Result<Self, ExtractError> {
        value
            .as_str()
            .and_then(|s| Self::parse_from_rfc3339(s).ok())
            .ok_or_else(|| conversion(path, "RFC 3339 date-time", value))
    }
}

impl BindValue for Value {
    fn expected() -> String {
        "any JSON value".to_string()
    }

    fn bind(value: &Value, _path: &FieldPath) -> Result<Self, ExtractError> {
        Ok(value.clone())
    }

    fn from_null() -> Option<Self> {
        Some(Self::Null)
    }
}

impl<V: BindValue> BindValue for Option<V> {
    fn expected() -> String {
        format!("optional {}", V::expected())
    }

    fn bind(value: &Value, path: &FieldPath) -> Result<Self, ExtractError> {
        if value.is_null() {
            return Ok(V::from_null());
        }
        V::bind(value, path).map(Some)
    }

    fn from_null() -> Option<Self> {
        Some(V::from_null())
    }
}

impl<V: BindValue> BindValue for Vec<V> {
    fn expected() -> String {
        format!("list of {}", V::expected())
    }

    fn bind(value: &Value, path: &FieldPath) -> Result<Self, ExtractError> {
        let Some(items) = value.as_array() else {
            return Err(conversion(path, &Self::expected(), value));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let path = path.index(i);
                if item.is_null() {
                    V::from_null().ok_or_else(|| conversion(&path, &V::expected(), item))
                } else {
                    V::bind(item, &path)
                }
            })
            .collect()
    }
}
