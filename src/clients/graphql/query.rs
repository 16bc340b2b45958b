//! GraphQL document assembly.
//!
//! A document requests exactly one root field named after the operation:
//!
//! ```text
//! <operation> <name>($a: T, ...) { <name>(a: $a, ...) { <selection> } }
//! ```

use std::fmt;

use crate::clients::graphql::arguments::Arguments;
use crate::clients::graphql::errors::AssemblyError;
use crate::clients::graphql::schema::{selection, GraphqlType};

/// The kind of GraphQL operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A read-only `query`.
    Query,
    /// A `mutation`.
    Mutation,
}

impl Operation {
    /// Returns the keyword used in the document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assembles the document for `name` returning values of shape `T`.
///
/// Arguments are emitted in name order. Argument types are inferred before
/// the selection set is built.
///
/// # Errors
///
/// Returns [`AssemblyError`] naming the first argument whose value has no
/// GraphQL type.
///
/// # Panics
///
/// Panics if `T` is not a struct after stripping pointers and lists.
///
/// # Example
///
/// ```rust
/// use borgbase_api::clients::graphql::{assemble, required, Arguments, Operation};
/// use borgbase_api::resources::DeleteResult;
///
/// let arguments = Arguments::new().with("id", required("abc"));
/// let document = assemble::<DeleteResult>(Operation::Mutation, "repoDelete", &arguments).unwrap();
///
/// assert_eq!(
///     document,
///     "mutation repoDelete($id: String!) { repoDelete(id: $id) { ok } }"
/// );
/// ```
pub fn assemble<T: GraphqlType + ?Sized + 'static>(
    operation: Operation,
    name: &str,
    arguments: &Arguments,
) -> Result<String, AssemblyError> {
    let mut variables = Vec::with_capacity(arguments.len());
    let mut bindings = Vec::with_capacity(arguments.len());

    for (argument, value) in arguments.iter() {
        let graphql_type = value.graphql_type().map_err(|source| AssemblyError {
            argument: argument.to_string(),
            source,
        })?;
        variables.push(format!("${argument}: {graphql_type}"));
        bindings.push(format!("{argument}: ${argument}"));
    }

    let fields = selection::<T>();

    Ok(format!(
        "{operation} {name}({}) {{ {name}({}) {{ {fields} }} }}",
        variables.join(", "),
        bindings.join(", "),
    ))
}
