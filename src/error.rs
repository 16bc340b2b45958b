//! Error types for the BorgBase API client.
//!
//! This module contains the configuration and validation errors raised while
//! building a [`ClientConfig`](crate::ClientConfig). Errors raised while
//! talking to the API live in [`clients`](crate::clients).
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use borgbase_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid BorgBase API token.")]
    EmptyApiKey,

    /// API key contains characters that cannot be sent in an HTTP header.
    #[error("API key contains invalid characters. Only visible ASCII characters are allowed.")]
    InvalidApiKey,

    /// GraphQL endpoint is not a usable URL.
    #[error("Invalid endpoint '{url}'. Please provide an http(s) URL with a host (e.g., 'https://api.borgbase.com/graphql').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },
}
