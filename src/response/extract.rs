//! Typed extraction of response data.
//!
//! [`extract_object`] and [`extract_list`] look up a field path in a data
//! section and bind the value found there onto a [`Shape`].
//!
//! | JSON at path | `extract_object`        | `extract_list`          |
//! |--------------|-------------------------|-------------------------|
//! | object       | binds it                | one-element list        |
//! | list         | binds the first element | binds every element     |
//! | empty list   | `FieldNotFound`         | empty list              |
//! | `null`       | `FieldNotFound`         | empty list              |
//! | missing      | `FieldNotFound`         | `FieldNotFound`         |

use std::fmt;

use serde_json::{Map, Value};

use crate::error::ExtractError;
use crate::response::shape::{conversion, BindValue, Shape, ShapeTable};

/// A dotted, indexed path into response data such as `people[3].birthDate`.
///
/// Used to locate conversion failures.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// A path consisting of a single top-level name.
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Appends a member name.
    #[must_use]
    pub fn key(&self, name: &str) -> Self {
        if self.0.is_empty() {
            return Self(name.to_string());
        }
        Self(format!("{}.{name}", self.0))
    }

    /// Appends a list index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Returns the path as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Looks up a dot-separated path in a data section.
///
/// # Errors
///
/// Returns [`ExtractError::FieldNotFound`] if any segment is missing or an
/// intermediate value is not an object.
pub fn lookup<'a>(data: &'a Map<String, Value>, path: &str) -> Result<&'a Value, ExtractError> {
    let not_found = || ExtractError::FieldNotFound {
        path: path.to_string(),
    };
    let mut segments = path.split('.');
    let first = segments.next().filter(|s| !s.is_empty()).ok_or_else(not_found)?;
    let mut current = data.get(first).ok_or_else(not_found)?;
    for segment in segments {
        current = current
            .as_object()
            .and_then(|object| object.get(segment))
            .ok_or_else(not_found)?;
    }
    Ok(current)
}

/// Binds the object at `path` onto `T`.
///
/// If the value at `path` is a list, the first element is bound.
///
/// # Errors
///
/// Returns [`ExtractError::FieldNotFound`] when the path is missing, `null`,
/// or an empty list, and [`ExtractError::Conversion`] when binding fails.
///
/// # Example
///
/// ```rust
/// use gqlbind::response::{extract_object, Shape, ShapeTable};
/// use serde_json::json;
///
/// #[derive(Default)]
/// struct Profile {
///     id: i64,
/// }
///
/// impl Shape for Profile {
///     fn describe(table: &mut ShapeTable<Self>) {
///         table.field("id", |p: &mut Self, v| p.id = v);
///     }
/// }
///
/// let data = json!({"profile": {"id": 2}});
/// let profile: Profile = extract_object(data.as_object().unwrap(), "profile").unwrap();
/// assert_eq!(profile.id, 2);
/// ```
pub fn extract_object<T: Shape>(data: &Map<String, Value>, path: &str) -> Result<T, ExtractError> {
    ShapeTable::<T>::build().extract_object(data, path)
}

/// Binds every object at `path` onto `T`.
///
/// A single object yields a one-element list.
///
/// # Errors
///
/// Returns [`ExtractError::FieldNotFound`] when the path is missing and
/// [`ExtractError::Conversion`] when any element fails to bind.
pub fn extract_list<T: Shape>(
    data: &Map<String, Value>,
    path: &str,
) -> Result<Vec<T>, ExtractError> {
    ShapeTable::<T>::build().extract_list(data, path)
}

/// Converts the scalar (or list of scalars) at `path`.
///
/// # Errors
///
/// Returns [`ExtractError::FieldNotFound`] when the path is missing, or when
/// it holds `null` and `V` has no null form. Returns
/// [`ExtractError::Conversion`] when the value cannot be converted.
pub fn extract_value<V: BindValue>(data: &Map<String, Value>, path: &str) -> Result<V, ExtractError> {
    let value = lookup(data, path)?;
    if value.is_null() {
        return V::from_null().ok_or_else(|| ExtractError::FieldNotFound {
            path: path.to_string(),
        });
    }
    V::bind(value, &FieldPath::root(path))
}

impl<T: Shape> ShapeTable<T> {
    /// Binds the object at `path`, reusing this table.
    ///
    /// # Errors
    ///
    /// See [`extract_object`].
    pub fn extract_object(&self, data: &Map<String, Value>, path: &str) -> Result<T, ExtractError> {
        let root = FieldPath::root(path);
        match lookup(data, path)? {
            Value::Array(items) => {
                let first = items.first().ok_or_else(|| ExtractError::FieldNotFound {
                    path: root.index(0).to_string(),
                })?;
                self.bind(first, &root.index(0))
            }
            Value::Null => Err(ExtractError::FieldNotFound {
                path: path.to_string(),
            }),
            value => self.bind(value, &root),
        }
    }

    /// Binds every object at `path`, reusing this table.
    ///
    /// # Errors
    ///
    /// See [`extract_list`].
    pub fn extract_list(&self, data: &Map<String, Value>, path: &str) -> Result<Vec<T>, ExtractError> {
        let root = FieldPath::root(path);
        match lookup(data, path)? {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.bind(item, &root.index(i)))
                .collect(),
            Value::Null => Ok(Vec::new()),
            value @ Value::Object(_) => Ok(vec![self.bind(value, &root)?]),
            value => Err(conversion(&root, "object or list of objects", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Item {
        id: i64,
    }

    impl Shape for Item {
        fn describe(table: &mut ShapeTable<Self>) {
            table.field("id", |item: &mut Self, v| item.id = v);
        }
    }

    fn data(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test data must be an object"),
        }
    }

    #[test]
    fn test_field_path_display() {
        let path = FieldPath::root("people").index(3).key("birthDate");
        assert_eq!(path.to_string(), "people[3].birthDate");
        assert_eq!(FieldPath::root("").key("a").as_str(), "a");
    }

    #[test]
    fn test_lookup_nested_path() {
        let data = data(json!({"viewer": {"repository": {"name": "x"}}}));
        assert_eq!(lookup(&data, "viewer.repository.name").unwrap(), &json!("x"));
        assert_eq!(
            lookup(&data, "viewer.missing"),
            Err(ExtractError::FieldNotFound {
                path: "viewer.missing".to_string()
            })
        );
        assert!(lookup(&data, "viewer.repository.name.deeper").is_err());
        assert!(lookup(&data, "").is_err());
    }

    #[test]
    fn test_object_from_single_object() {
        let data = data(json!({"item": {"id": 7}}));
        assert_eq!(extract_object::<Item>(&data, "item").unwrap(), Item { id: 7 });
    }

    #[test]
    fn test_object_from_single_element_list() {
        let data = data(json!({"items": [{"id": 1}]}));
        assert_eq!(extract_object::<Item>(&data, "items").unwrap(), Item { id: 1 });
    }

    #[test]
    fn test_object_from_many_takes_first() {
        let data = data(json!({"items": [{"id": 1}, {"id": 2}, {"id": 3}]}));
        assert_eq!(extract_object::<Item>(&data, "items").unwrap(), Item { id: 1 });
    }

    #[test]
    fn test_object_from_empty_list_or_null_is_not_found() {
        let data = data(json!({"items": [], "nothing": null}));
        assert_eq!(
            extract_object::<Item>(&data, "items"),
            Err(ExtractError::FieldNotFound {
                path: "items[0]".to_string()
            })
        );
        assert!(matches!(
            extract_object::<Item>(&data, "nothing"),
            Err(ExtractError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_list_from_single_object_is_one_element() {
        let data = data(json!({"item": {"id": 4}}));
        assert_eq!(extract_list::<Item>(&data, "item").unwrap(), vec![Item { id: 4 }]);
    }

    #[test]
    fn test_list_from_null_is_empty() {
        let data = data(json!({"items": null}));
        assert!(extract_list::<Item>(&data, "items").unwrap().is_empty());
    }

    #[test]
    fn test_list_from_scalar_is_conversion_error() {
        let data = data(json!({"items": 5}));
        assert!(matches!(
            extract_list::<Item>(&data, "items"),
            Err(ExtractError::Conversion { ref path, .. }) if path == "items"
        ));
    }

    #[test]
    fn test_list_error_names_element() {
        let data = data(json!({"items": [{"id": 1}, {"id": "nope"}]}));
        assert_eq!(
            extract_list::<Item>(&data, "items"),
            Err(ExtractError::Conversion {
                path: "items[1].id".to_string(),
                expected: "i64".to_string(),
                found: "string \"nope\"".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let data = data(json!({"items": []}));
        assert_eq!(
            extract_list::<Item>(&data, "people"),
            Err(ExtractError::FieldNotFound {
                path: "people".to_string()
            })
        );
    }

    #[test]
    fn test_extract_value() {
        let data = data(json!({"count": 3, "tags": ["a", "b"], "gone": null}));
        assert_eq!(extract_value::<u32>(&data, "count").unwrap(), 3);
        assert_eq!(
            extract_value::<Vec<String>>(&data, "tags").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(extract_value::<Option<i32>>(&data, "gone").unwrap(), None);
        assert!(extract_value::<i32>(&data, "gone").is_err());
    }

    #[test]
    fn test_table_reuse_across_calls() {
        let table = ShapeTable::<Item>::build();
        let first = data(json!({"a": {"id": 1}}));
        let second = data(json!({"b": [{"id": 2}, {"id": 3}]}));

        assert_eq!(table.extract_object(&first, "a").unwrap().id, 1);
        assert_eq!(table.extract_list(&second, "b").unwrap().len(), 2);
    }
}
