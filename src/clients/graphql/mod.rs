//! GraphQL document generation and execution.
//!
//! This module builds GraphQL documents from statically typed result schemas,
//! binds typed arguments, sends the request and decodes the response back into
//! the caller's schema value.
//!
//! # Overview
//!
//! - [`GraphqlType`] / [`Shape`]: the static shape of a Rust type
//! - [`graphql_object!`](crate::graphql_object): derives [`GraphqlType`] for result structs
//! - [`Argument`] / [`Arguments`]: named argument values with required/optional binding
//! - [`assemble`]: builds the document for one operation
//! - [`execute`] / [`GraphqlClient`]: run an operation and decode the result
//! - [`GraphqlErrors`]: errors reported by the server
//!
//! # Document Format
//!
//! Every operation requests exactly one root field, named like the operation:
//!
//! ```text
//! mutation repoDelete($id: String!) { repoDelete(id: $id) { ok } }
//! ```
//!
//! Variable declarations and bindings are emitted in argument-name order.
//! Argument values travel in `variables`, encoded as a JSON string.
//!
//! # Example
//!
//! ```rust,no_run
//! use borgbase_api::clients::graphql::{required, Arguments, GraphqlClient};
//! use borgbase_api::graphql_object;
//! use borgbase_api::ClientConfig;
//! use serde::Deserialize;
//!
//! graphql_object! {
//!     #[derive(Debug, Default, Deserialize)]
//!     #[serde(default)]
//!     pub struct Deleted {
//!         pub ok: bool,
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GraphqlClient::new(&ClientConfig::from_env()?);
//!
//! let mut result = Deleted::default();
//! client
//!     .mutation("sshDelete", &mut result, &Arguments::new().with("id", required("42")))
//!     .await?;
//! assert!(result.ok);
//! # Ok(())
//! # }
//! ```

mod arguments;
mod client;
mod errors;
mod macros;
mod query;
mod schema;

pub use arguments::{optional, required, Argument, Arguments};
pub use client::{execute, GraphqlClient, SDK_VERSION};
pub use errors::{AssemblyError, GraphqlError, GraphqlErrors, Location, TypeError};
pub use query::{assemble, Operation};
pub use schema::{
    infer, infer_type, infer_value, project, selection, Field, GraphqlType, ScalarKind, Shape,
};
