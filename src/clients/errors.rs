//! Error types for the BorgBase API client.
//!
//! [`ClientError`] covers every way an operation can fail after the client
//! was configured. Each stage of a round trip has its own variant, so callers
//! can tell a rejected argument from a network failure or a server-side
//! GraphQL error.

use thiserror::Error;

use crate::clients::graphql::{AssemblyError, GraphqlErrors};

/// Error returned by GraphQL operations.
///
/// # Example
///
/// ```rust
/// use borgbase_api::clients::ClientError;
///
/// let error = ClientError::ServerFault {
///     status: 502,
///     body: "bad gateway".to_string(),
/// };
/// assert_eq!(error.to_string(), "expected status 200, got 502: bad gateway");
/// ```
#[derive(Debug, Error)]
pub enum ClientError {
    /// An argument could not be typed. No request was sent.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    /// The request payload could not be serialized. No request was sent.
    #[error("failed to encode request: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request could not be sent or the response body could not be read.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a 5xx status.
    #[error("expected status 200, got {status}: {body}")]
    ServerFault {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response envelope or payload did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The server reported one or more GraphQL errors.
    #[error(transparent)]
    Graphql(#[from] GraphqlErrors),
}

impl ClientError {
    /// Returns the server-reported GraphQL errors, if that is what failed.
    #[must_use]
    pub const fn graphql_errors(&self) -> Option<&GraphqlErrors> {
        match self {
            Self::Graphql(errors) => Some(errors),
            _ => None,
        }
    }

    /// Returns the HTTP status of a server fault.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ServerFault { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Verify ClientError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientError>();
};
