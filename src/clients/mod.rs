//! Client types for BorgBase API communication.
//!
//! # Overview
//!
//! - [`graphql::GraphqlClient`]: runs typed queries and mutations
//! - [`Transport`]: a single-shot HTTP round trip, implemented by [`reqwest::Client`]
//! - [`AuthedTransport`]: a transport that adds `Authorization: bearer <key>`
//! - [`ClientError`]: everything an operation can fail with
//!
//! # Example
//!
//! ```rust
//! use borgbase_api::clients::{AuthedTransport, GraphqlClient};
//! use borgbase_api::{ApiKey, Endpoint};
//!
//! let transport = AuthedTransport::new(&ApiKey::new("token").unwrap(), reqwest::Client::new());
//! let client = GraphqlClient::with_transport(
//!     Endpoint::new("https://api.borgbase.com/graphql").unwrap(),
//!     transport,
//! );
//! assert_eq!(client.endpoint().host_name(), Some("api.borgbase.com"));
//! ```
//!
//! # Retry Behavior
//!
//! None. Each call sends exactly one request and reports the first failure;
//! callers decide whether to try again.

mod errors;
pub mod graphql;
mod transport;

pub use errors::ClientError;
pub use transport::{AuthedTransport, Transport};

// Re-export GraphQL client types at the clients module level
pub use graphql::{GraphqlClient, GraphqlError, GraphqlErrors, SDK_VERSION};
