//! Response envelope and typed extraction.
//!
//! # Overview
//!
//! - [`Response`]: wraps a raw JSON payload into a data section and an
//!   ordered list of [`ServerError`]s
//! - [`Shape`] / [`ShapeTable`]: declarative description of a target type
//! - [`BindValue`]: scalar conversions (strings, numbers, dates, lists, options)
//! - [`extract_object`] / [`extract_list`]: bind a field path onto a shape
//! - [`ResponseLogger`]: optional diagnostics hook for envelope parsing
//!
//! # Example
//!
//! ```rust
//! use gqlbind::response::{Response, Shape, ShapeTable};
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     id: i64,
//!     surname: String,
//!     names: Vec<String>,
//! }
//!
//! impl Shape for Person {
//!     fn describe(table: &mut ShapeTable<Self>) {
//!         table
//!             .field("id", |p: &mut Self, v| p.id = v)
//!             .field("surname", |p: &mut Self, v| p.surname = v)
//!             .field("names", |p: &mut Self, v| p.names = v);
//!     }
//! }
//!
//! let response: Response = r#"{"data": {"people": [
//!     {"id": 1, "surname": "Doe", "names": ["Jane"]},
//!     {"id": 2, "surname": "Roe", "extra": true}
//! ]}}"#
//!     .parse()
//!     .unwrap();
//!
//! let people: Vec<Person> = response.get_list("people").unwrap();
//! assert_eq!(people.len(), 2);
//! assert_eq!(people[1].surname, "Roe");
//! assert!(people[1].names.is_empty());
//! ```

mod envelope;
mod extract;
mod logger;
mod shape;

pub use envelope::{Location, PathSegment, Response, ServerError};
pub use extract::{extract_list, extract_object, extract_value, lookup, FieldPath};
pub use logger::{preview, NoopLogger, ResponseLogger, TracingLogger, MAX_PREVIEW_LENGTH};
pub use shape::{conversion, BindValue, Shape, ShapeTable, DEFAULT_DATE_FORMAT};

// Verify the envelope is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Response>();
    assert_send_sync::<ShapeTable<Response>>();
};
