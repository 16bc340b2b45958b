//! Typed operation arguments.
//!
//! An [`Argument`] pairs a value with a required/optional flag. The flag only
//! affects the variable declaration (`$id: String!` vs `$id: String`); the
//! `variables` payload always carries the bare value.
//!
//! [`Arguments`] is keyed by argument name and iterates in lexicographic
//! order, so the same argument set always yields the same document.
//!
//! # Example
//!
//! ```rust
//! use borgbase_api::clients::graphql::{optional, required, Arguments};
//!
//! let arguments = Arguments::new()
//!     .with("name", required("backups"))
//!     .with("quota", optional(500_i64));
//!
//! assert_eq!(arguments.len(), 2);
//! assert_eq!(
//!     serde_json::Value::Object(arguments.variables().unwrap()),
//!     serde_json::json!({ "name": "backups", "quota": 500 })
//! );
//! ```

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::graphql::errors::TypeError;
use crate::clients::graphql::schema::{infer, GraphqlType, Shape};

trait ArgumentValue: fmt::Debug + Send + Sync {
    fn shape(&self) -> Shape;
    fn to_json(&self) -> Result<Value, serde_json::Error>;
}

impl<T> ArgumentValue for T
where
    T: Serialize + GraphqlType + fmt::Debug + Send + Sync,
{
    fn shape(&self) -> Shape {
        <T as GraphqlType>::shape()
    }

    fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// A single argument value with its required/optional binding.
#[derive(Clone, Debug)]
pub struct Argument {
    value: Arc<dyn ArgumentValue>,
    required: bool,
}

impl Argument {
    /// Creates a required (non-null) argument.
    pub fn required<T>(value: T) -> Self
    where
        T: Serialize + GraphqlType + fmt::Debug + Send + Sync + 'static,
    {
        Self {
            value: Arc::new(value),
            required: true,
        }
    }

    /// Creates an optional (nullable) argument.
    pub fn optional<T>(value: T) -> Self
    where
        T: Serialize + GraphqlType + fmt::Debug + Send + Sync + 'static,
    {
        Self {
            value: Arc::new(value),
            required: false,
        }
    }

    /// Returns `true` if the argument is declared non-null.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the shape of the wrapped value.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.value.shape()
    }

    /// Infers the GraphQL type used in the variable declaration.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError`] if the value is not a scalar or a list of scalars.
    pub fn graphql_type(&self) -> Result<String, TypeError> {
        infer(&self.value.shape(), self.required)
    }

    /// Serializes the wrapped value.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if the value cannot be represented as JSON.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        self.value.to_json()
    }
}

/// Shorthand for [`Argument::required`].
pub fn required<T>(value: T) -> Argument
where
    T: Serialize + GraphqlType + fmt::Debug + Send + Sync + 'static,
{
    Argument::required(value)
}

/// Shorthand for [`Argument::optional`].
pub fn optional<T>(value: T) -> Argument
where
    T: Serialize + GraphqlType + fmt::Debug + Send + Sync + 'static,
{
    Argument::optional(value)
}

/// The arguments of one operation, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct Arguments(BTreeMap<String, Argument>);

impl Arguments {
    /// Creates an empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument, replacing any previous one with the same name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, argument: Argument) -> Self {
        self.0.insert(name.into(), argument);
        self
    }

    /// Inserts an argument, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, argument: Argument) -> Option<Argument> {
        self.0.insert(name.into(), argument)
    }

    /// Returns the argument with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.0.get(name)
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the arguments in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.0.iter().map(|(name, argument)| (name.as_str(), argument))
    }

    /// Builds the `variables` object from the bare argument values.
    ///
    /// # Errors
    ///
    /// Returns the first serialization error encountered.
    pub fn variables(&self) -> Result<Map<String, Value>, serde_json::Error> {
        self.0
            .iter()
            .map(|(name, argument)| Ok((name.clone(), argument.to_json()?)))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Argument)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, Argument)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, argument)| (name.into(), argument))
                .collect(),
        )
    }
}

impl<K: Into<String>> Extend<(K, Argument)> for Arguments {
    fn extend<I: IntoIterator<Item = (K, Argument)>>(&mut self, iter: I) {
        self.0.extend(
            iter.into_iter()
                .map(|(name, argument)| (name.into(), argument)),
        );
    }
}

impl IntoIterator for Arguments {
    type Item = (String, Argument);
    type IntoIter = btree_map::IntoIter<String, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
