//! Rendering of the request model to GraphQL wire text.
//!
//! The output is deterministic: variables, fields, and arguments are written
//! in insertion order. The serializer checks syntax only. It does not verify
//! that referenced variables are declared or that argument values match the
//! declared variable types.

use std::collections::HashSet;

use crate::error::BuildError;
use crate::request::value::write_value;
use crate::request::{Document, Field, Operation};

/// Renders an operation to request text.
///
/// # Errors
///
/// Returns [`BuildError::EmptySelection`] when the operation has no fields,
/// [`BuildError::DuplicateVariable`] when a variable name is declared twice,
/// and any error raised while formatting argument or default values.
///
/// # Example
///
/// ```rust
/// use gqlbind::request::{serialize, Field, Operation};
///
/// let operation = Operation::query().field(Field::new("people").select(["id", "surname"]));
/// assert_eq!(serialize(&operation).unwrap(), "{ people { id surname } }");
/// ```
pub fn serialize(operation: &Operation) -> Result<String, BuildError> {
    let mut out = String::new();
    write_operation(&mut out, operation)?;
    Ok(out)
}

impl Operation {
    /// Renders this operation to request text.
    ///
    /// # Errors
    ///
    /// See [`serialize`].
    pub fn serialize(&self) -> Result<String, BuildError> {
        serialize(self)
    }
}

impl Document {
    /// Renders every operation, separated by newlines.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptySelection`] for an empty document, or the
    /// first error raised by any operation.
    pub fn serialize(&self) -> Result<String, BuildError> {
        if self.operations().is_empty() {
            return Err(BuildError::EmptySelection);
        }
        let mut out = String::new();
        for (i, operation) in self.operations().iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            write_operation(&mut out, operation)?;
        }
        Ok(out)
    }
}

fn write_operation(out: &mut String, operation: &Operation) -> Result<(), BuildError> {
    if operation.fields().is_empty() {
        return Err(BuildError::EmptySelection);
    }

    if !operation.is_shorthand() {
        out.push_str(operation.ty().keyword());
        if let Some(name) = operation.operation_name() {
            out.push(' ');
            out.push_str(name);
        }
        write_variable_declarations(out, operation)?;
        out.push(' ');
    }

    write_selection_set(out, operation.fields())
}

fn write_variable_declarations(out: &mut String, operation: &Operation) -> Result<(), BuildError> {
    if operation.variables().is_empty() {
        return Ok(());
    }

    let mut seen = HashSet::new();
    out.push('(');
    for (i, variable) in operation.variables().iter().enumerate() {
        if variable.name().is_empty() {
            return Err(BuildError::EmptyName { kind: "variable" });
        }
        if !seen.insert(variable.name()) {
            return Err(BuildError::DuplicateVariable {
                name: variable.name().to_string(),
            });
        }
        if i > 0 {
            out.push_str(", ");
        }
        out.push('$');
        out.push_str(variable.name());
        out.push_str(": ");
        out.push_str(&variable.ty().to_string());
        if let Some(default) = variable.default_literal() {
            out.push_str(" = ");
            write_value(out, default)?;
        }
    }
    out.push(')');
    Ok(())
}

fn write_selection_set(out: &mut String, fields: &[Field]) -> Result<(), BuildError> {
    out.push_str("{ ");
    for field in fields {
        write_field(out, field)?;
        out.push(' ');
    }
    out.push('}');
    Ok(())
}

fn write_field(out: &mut String, field: &Field) -> Result<(), BuildError> {
    if field.name().is_empty() {
        return Err(BuildError::EmptyName { kind: "field" });
    }
    if let Some(alias) = field.alias_name() {
        out.push_str(alias);
        out.push_str(": ");
    }
    out.push_str(field.name());

    let mut arguments = field.arguments().peekable();
    if arguments.peek().is_some() {
        out.push('(');
        for (i, (name, value)) in arguments.enumerate() {
            if name.is_empty() {
                return Err(BuildError::EmptyName { kind: "argument" });
            }
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(name);
            out.push_str(": ");
            write_value(out, value)?;
        }
        out.push(')');
    }

    if !field.is_leaf() {
        out.push(' ');
        write_selection_set(out, field.children())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{EnumValue, InputObject, Value, Variable, VariableType};

    #[test]
    fn test_shorthand_query_omits_keyword() {
        let operation = Operation::query().field(Field::new("hello"));
        assert_eq!(serialize(&operation).unwrap(), "{ hello }");
    }

    #[test]
    fn test_named_query_has_keyword_and_name() {
        let operation = Operation::query()
            .name("allPeople")
            .field(Field::new("people").select(["id"]));
        assert_eq!(
            serialize(&operation).unwrap(),
            "query allPeople { people { id } }"
        );
    }

    #[test]
    fn test_anonymous_mutation_keeps_keyword() {
        let operation = Operation::mutation().field(
            Field::new("createPerson")
                .arg("person", InputObject::new().field("surname", "Doe"))
                .select(["id"]),
        );
        assert_eq!(
            serialize(&operation).unwrap(),
            r#"mutation { createPerson(person: {surname: "Doe"}) { id } }"#
        );
    }

    #[test]
    fn test_variable_declarations_with_defaults() {
        let first = Variable::new("first", VariableType::named("Int")).default_value(10);
        let order = Variable::new("order", VariableType::named("Order").non_null())
            .default_value(EnumValue::new("ASC"));
        let operation = Operation::query()
            .name("page")
            .variable(first.clone())
            .variable(order.clone())
            .field(
                Field::new("people")
                    .arg("first", first.reference())
                    .arg("order", order.reference())
                    .select(["id"]),
            );

        assert_eq!(
            serialize(&operation).unwrap(),
            "query page($first: Int = 10, $order: Order! = ASC) { people(first: $first, order: $order) { id } }"
        );
    }

    #[test]
    fn test_alias_and_nested_children() {
        let operation = Operation::query().field(
            Field::new("person")
                .alias("me")
                .arg("id", 1)
                .field(Field::new("addresses").select(["code", "lines"])),
        );
        assert_eq!(
            serialize(&operation).unwrap(),
            "{ me: person(id: 1) { addresses { code lines } } }"
        );
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        assert_eq!(
            serialize(&Operation::query().name("empty")),
            Err(BuildError::EmptySelection)
        );
    }

    #[test]
    fn test_duplicate_variable_is_rejected() {
        let operation = Operation::query()
            .variable(Variable::new("id", VariableType::named("Int")))
            .variable(Variable::new("id", VariableType::named("ID")))
            .field(Field::new("person"));
        assert_eq!(
            serialize(&operation),
            Err(BuildError::DuplicateVariable {
                name: "id".to_string()
            })
        );
    }

    #[test]
    fn test_undeclared_variable_reference_is_not_checked() {
        let operation =
            Operation::query().field(Field::new("person").arg("id", Value::Variable("nope".into())));
        assert_eq!(
            serialize(&operation).unwrap(),
            "{ person(id: $nope) }"
        );
    }

    #[test]
    fn test_empty_field_name_is_rejected() {
        let operation = Operation::query().field(Field::new(""));
        assert_eq!(
            serialize(&operation),
            Err(BuildError::EmptyName { kind: "field" })
        );
    }

    #[test]
    fn test_document_joins_operations() {
        let document = Document::new()
            .operation(Operation::query().name("a").field(Field::new("x")))
            .operation(Operation::mutation().name("b").field(Field::new("y")));
        assert_eq!(document.serialize().unwrap(), "query a { x }\nmutation b { y }");
        assert_eq!(Document::new().serialize(), Err(BuildError::EmptySelection));
    }
}
