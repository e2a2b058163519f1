//! Request model and serializer.
//!
//! This module provides an abstract-syntax representation of a GraphQL
//! request and the serializer that turns it into wire text.
//!
//! # Overview
//!
//! - [`Operation`]: a query, mutation, or subscription with variables and fields
//! - [`Field`]: a selection with an optional alias, arguments, and children
//! - [`Variable`] / [`VariableType`]: declared operation parameters
//! - [`Value`]: argument values, including [`InputObject`] and [`EnumValue`]
//! - [`format`]: renders a [`Value`] as a literal
//! - [`serialize`]: renders an [`Operation`] as request text
//!
//! # Example
//!
//! ```rust
//! use gqlbind::request::{Field, InputObject, Operation, Variable, VariableType};
//!
//! let surname = Variable::new("surname", VariableType::named("String").non_null());
//! let operation = Operation::query()
//!     .name("bySurname")
//!     .field(
//!         Field::new("personsWithSurname")
//!             .arg("surname", surname.reference())
//!             .arg("filter", InputObject::new().field("minAge", 18))
//!             .select(["id", "surname"]),
//!     )
//!     .variable(surname);
//!
//! assert_eq!(
//!     operation.serialize().unwrap(),
//!     "query bySurname($surname: String!) { personsWithSurname(surname: $surname, filter: {minAge: 18}) { id surname } }"
//! );
//! ```
//!
//! # Thread Safety
//!
//! Every type in this module is `Send + Sync`. Serialization borrows the
//! model immutably, so a model cannot change while it is being rendered.

mod model;
mod serializer;
mod value;

pub use model::{Document, Field, Operation, OperationType, Variable, VariableType};
pub use serializer::serialize;
pub use value::{format, quote, EnumValue, InputObject, Value};

// Verify the request model is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Operation>();
    assert_send_sync::<Document>();
    assert_send_sync::<Value>();
};
