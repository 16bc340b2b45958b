//! GraphQL-specific error types.
//!
//! - [`GraphqlError`] / [`GraphqlErrors`]: errors reported by the server in
//!   the response envelope's `errors` array
//! - [`TypeError`]: an argument value has no GraphQL type
//! - [`AssemblyError`]: a [`TypeError`] annotated with the argument's name
//!
//! # Rendering
//!
//! A server error renders as `message at [line:column, ...]`; a set of errors
//! joins each rendering with `; `:
//!
//! ```rust
//! use borgbase_api::clients::graphql::GraphqlErrors;
//!
//! let errors: GraphqlErrors = serde_json::from_str(
//!     r#"[{"message":"boom","locations":[{"line":1,"column":2}]},{"message":"bad"}]"#,
//! )
//! .unwrap();
//! assert_eq!(errors.to_string(), "boom at [1:2]; bad at []");
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// A position in the GraphQL document.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct Location {
    /// One-based line number.
    pub line: u32,
    /// One-based column number.
    pub column: u32,
}

/// A single error reported by the GraphQL server.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GraphqlError {
    /// Human-readable description of the error.
    pub message: String,
    /// Locations in the document the error refers to.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locations: Vec<Location>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Location>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Location>>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Display for GraphqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at [", self.message)?;
        for (i, location) in self.locations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}:{}", location.line, location.column)?;
        }
        f.write_str("]")
    }
}

impl std::error::Error for GraphqlError {}

/// The ordered set of errors from one response.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct GraphqlErrors(Vec<GraphqlError>);

impl GraphqlErrors {
    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the server reported no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the errors in response order.
    pub fn iter(&self) -> std::slice::Iter<'_, GraphqlError> {
        self.0.iter()
    }

    /// Returns the errors as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[GraphqlError] {
        &self.0
    }

    /// Consumes the set, returning the errors.
    #[must_use]
    pub fn into_inner(self) -> Vec<GraphqlError> {
        self.0
    }
}

impl From<Vec<GraphqlError>> for GraphqlErrors {
    fn from(errors: Vec<GraphqlError>) -> Self {
        Self(errors)
    }
}

impl<'a> IntoIterator for &'a GraphqlErrors {
    type Item = &'a GraphqlError;
    type IntoIter = std::slice::Iter<'a, GraphqlError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for GraphqlErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for GraphqlErrors {}

/// An argument value that cannot be expressed as a GraphQL type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// The value's kind has no GraphQL mapping (structs, maps, pointers).
    #[error("unknown type {kind}")]
    UnsupportedType {
        /// The kind that was rejected.
        kind: &'static str,
    },

    /// A list whose element type is not a scalar.
    #[error("slice type must be scalar, got {element}")]
    InvalidArgumentType {
        /// The kind of the list element.
        element: &'static str,
    },
}

/// Error raised while assembling a document, before any network I/O.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to convert field {argument}: {source}")]
pub struct AssemblyError {
    /// Name of the offending argument.
    pub argument: String,
    /// Why the argument's type could not be inferred.
    pub source: TypeError,
}
