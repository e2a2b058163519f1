//! The request model: operations, fields, and variable declarations.

use std::fmt;

use crate::request::Value;

/// The kind of a GraphQL operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// A read-only fetch.
    #[default]
    Query,
    /// A write followed by a fetch.
    Mutation,
    /// A long-lived request that receives a stream of results.
    Subscription,
}

impl OperationType {
    /// Returns the keyword used on the wire.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The declared type of a variable, e.g. `Int`, `String!`, or `[ID!]!`.
///
/// # Example
///
/// ```rust
/// use gqlbind::request::VariableType;
///
/// let ty = VariableType::list(VariableType::named("ID").non_null()).non_null();
/// assert_eq!(ty.to_string(), "[ID!]!");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// A named type such as `Int` or `PersonInput`.
    Named {
        /// The type name.
        name: String,
        /// Whether the type is marked `!`.
        non_null: bool,
    },
    /// A list of another type.
    List {
        /// The element type.
        of: Box<VariableType>,
        /// Whether the list itself is marked `!`.
        non_null: bool,
    },
}

impl VariableType {
    /// A nullable named type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            non_null: false,
        }
    }

    /// A nullable list of `of`.
    #[must_use]
    pub fn list(of: Self) -> Self {
        Self::List {
            of: Box::new(of),
            non_null: false,
        }
    }

    /// Marks this type as non-null.
    #[must_use]
    pub fn non_null(self) -> Self {
        match self {
            Self::Named { name, .. } => Self::Named {
                name,
                non_null: true,
            },
            Self::List { of, .. } => Self::List { of, non_null: true },
        }
    }

    /// Returns `true` if this type is marked non-null.
    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        match self {
            Self::Named { non_null, .. } | Self::List { non_null, .. } => *non_null,
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let non_null = match self {
            Self::Named { name, non_null } => {
                f.write_str(name)?;
                *non_null
            }
            Self::List { of, non_null } => {
                write!(f, "[{of}]")?;
                *non_null
            }
        };
        if non_null {
            f.write_str("!")?;
        }
        Ok(())
    }
}

/// A variable declared on an operation.
///
/// The declaration carries only the name, type, and optional default. The
/// runtime value is bound when the request is sent, see
/// [`GraphqlRequest::add_variable`](crate::clients::GraphqlRequest::add_variable).
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    name: String,
    ty: VariableType,
    default_value: Option<Value>,
}

impl Variable {
    /// Declares a variable without a default.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: VariableType) -> Self {
        Self {
            name: name.into(),
            ty,
            default_value: None,
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Returns the variable name, without the leading `$`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type.
    #[must_use]
    pub const fn ty(&self) -> &VariableType {
        &self.ty
    }

    /// Returns the default value, if any.
    #[must_use]
    pub const fn default_literal(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Returns a reference to this variable for use as an argument value.
    #[must_use]
    pub fn reference(&self) -> Value {
        Value::from(self)
    }
}

/// A field selection.
///
/// A field with children is a composite selection; a field without children
/// is a leaf.
///
/// # Example
///
/// ```rust
/// use gqlbind::request::Field;
///
/// let person = Field::new("person")
///     .arg("id", 3)
///     .select(["id", "surname"])
///     .field(Field::new("addresses").select(["code"]));
///
/// assert!(!person.is_leaf());
/// assert_eq!(person.children().len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    name: String,
    alias: Option<String>,
    arguments: Vec<(String, Value)>,
    children: Vec<Field>,
}

impl Field {
    /// Creates a leaf field.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            arguments: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the alias under which the result is returned.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds or replaces an argument. Argument order is insertion order.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.arguments.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.arguments.push((name, value));
        }
        self
    }

    /// Appends a child field.
    #[must_use]
    pub fn field(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a leaf child for each name.
    #[must_use]
    pub fn select<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children.extend(names.into_iter().map(Self::new));
        self
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the alias, if any.
    #[must_use]
    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the key under which this field appears in response data.
    #[must_use]
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Returns the arguments in insertion order.
    pub fn arguments(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.arguments.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns the child fields.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns `true` if this field has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A single query, mutation, or subscription.
///
/// Variable uniqueness and the presence of at least one field are checked
/// when the operation is serialized, not while it is being built.
///
/// # Example
///
/// ```rust
/// use gqlbind::request::{Field, Operation, Variable, VariableType};
///
/// let id = Variable::new("personId", VariableType::named("Int").non_null());
/// let operation = Operation::query()
///     .name("profile")
///     .field(Field::new("profile").arg("personId", id.reference()).select(["id"]))
///     .variable(id);
///
/// assert_eq!(
///     operation.serialize().unwrap(),
///     "query profile($personId: Int!) { profile(personId: $personId) { id } }"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Operation {
    ty: OperationType,
    name: Option<String>,
    variables: Vec<Variable>,
    fields: Vec<Field>,
}

impl Operation {
    /// Creates an empty operation of the given type.
    #[must_use]
    pub const fn new(ty: OperationType) -> Self {
        Self {
            ty,
            name: None,
            variables: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Creates an empty query.
    #[must_use]
    pub const fn query() -> Self {
        Self::new(OperationType::Query)
    }

    /// Creates an empty mutation.
    #[must_use]
    pub const fn mutation() -> Self {
        Self::new(OperationType::Mutation)
    }

    /// Creates an empty subscription.
    #[must_use]
    pub const fn subscription() -> Self {
        Self::new(OperationType::Subscription)
    }

    /// Sets the operation name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declares a variable.
    #[must_use]
    pub fn variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Appends a top-level field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the operation type.
    #[must_use]
    pub const fn ty(&self) -> OperationType {
        self.ty
    }

    /// Returns the operation name, if any.
    #[must_use]
    pub fn operation_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the declared variables in order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Returns the top-level fields in order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns `true` if this operation can use the `{ ... }` shorthand.
    #[must_use]
    pub fn is_shorthand(&self) -> bool {
        self.ty == OperationType::Query && self.name.is_none() && self.variables.is_empty()
    }
}

/// An ordered collection of operations sent as one request document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    operations: Vec<Operation>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// Appends an operation.
    #[must_use]
    pub fn operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Returns the operations in order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

impl From<Operation> for Document {
    fn from(operation: Operation) -> Self {
        Self::new().operation(operation)
    }
}
