//! # BorgBase API Rust Client
//!
//! A Rust client for the BorgBase GraphQL API that builds its GraphQL
//! documents from statically typed result schemas.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the API token and endpoint
//! - Selection sets derived from Rust structs via [`graphql_object!`]
//! - Typed arguments with required/optional binding via [`required`] and [`optional`]
//! - An async [`GraphqlClient`] with bearer-token authentication
//! - Typed BorgBase operations in [`resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use borgbase_api::{ApiKey, ClientConfig, GraphqlClient};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("your-api-token").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build();
//!
//! let client = GraphqlClient::new(&config);
//! assert_eq!(client.endpoint().as_ref(), "https://api.borgbase.com/graphql");
//! ```
//!
//! ## Custom Schemas
//!
//! Any struct declared with [`graphql_object!`] can be used as a result
//! schema. Its fields become the selection set, in declaration order:
//!
//! ```rust,no_run
//! use borgbase_api::{graphql_object, optional, Arguments, ClientConfig, GraphqlClient};
//! use serde::Deserialize;
//!
//! graphql_object! {
//!     #[derive(Debug, Default, Deserialize)]
//!     #[serde(default)]
//!     pub struct RepoUsage {
//!         pub name: String,
//!         #[serde(rename = "currentUsage")]
//!         pub current_usage: f64,
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GraphqlClient::new(&ClientConfig::from_env()?);
//!
//! // query repoList($name: String) { repoList(name: $name) { name currentUsage } }
//! let mut usage: Vec<RepoUsage> = Vec::new();
//! client
//!     .query("repoList", &mut usage, &Arguments::new().with("name", optional("laptop")))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Configuration errors are reported as [`ConfigError`]. Operations return
//! [`ClientError`], which separates argument typing failures, transport
//! failures, server faults, decode failures and GraphQL errors reported by
//! the server.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events at `debug` level for each request and
//! at `warn` level for server faults and GraphQL errors. Install a subscriber
//! to see them. API tokens and argument values are never logged.
//!
//! ## Thread Safety
//!
//! [`ClientConfig`] and [`GraphqlClient`] are `Send + Sync`. Clones of a
//! [`GraphqlClient`] share one connection pool.

pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, ClientConfig, ClientConfigBuilder, Endpoint};
pub use error::ConfigError;

// Re-export client types
pub use clients::graphql::{optional, required, Argument, Arguments, GraphqlType, Operation};
pub use clients::{AuthedTransport, ClientError, GraphqlClient, GraphqlErrors, Transport};
