//! Configuration types for the BorgBase API client.
//!
//! This module provides the configuration used to construct a
//! [`GraphqlClient`](crate::GraphqlClient).
//!
//! # Overview
//!
//! - [`ClientConfig`]: The configuration struct holding all client settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`ApiKey`]: A validated API token newtype with masked debug output
//! - [`Endpoint`]: A validated GraphQL endpoint URL
//!
//! # Example
//!
//! ```rust
//! use borgbase_api::{ApiKey, ClientConfig};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("my-token").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build();
//!
//! assert_eq!(config.endpoint().as_ref(), "https://api.borgbase.com/graphql");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, Endpoint};

use std::time::Duration;

use crate::error::ConfigError;

/// The public BorgBase GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.borgbase.com/graphql";

/// Environment variable holding the API token.
pub const API_TOKEN_ENV_VAR: &str = "BORGBASE_API_TOKEN";

/// Configuration for a BorgBase API client.
///
/// Without an API key the client sends unauthenticated requests.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    endpoint: Endpoint,
    api_key: Option<ApiKey>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Builds a configuration for the default endpoint, taking the API key
    /// from the `BORGBASE_API_TOKEN` environment variable when it is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiKey`] if the variable holds a value
    /// that cannot be used as a token.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::builder().api_key_from_env()?.build())
    }

    /// Returns the GraphQL endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// # Defaults
///
/// - `endpoint`: [`DEFAULT_ENDPOINT`]
/// - `api_key`: `None` (unauthenticated)
/// - `timeout`: `None` (no deadline)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    endpoint: Option<Endpoint>,
    api_key: Option<ApiKey>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GraphQL endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Fills in the API key from `BORGBASE_API_TOKEN` unless one was set
    /// explicitly. An unset or empty variable leaves the key unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiKey`] if the variable is set to an
    /// unusable token.
    pub fn api_key_from_env(self) -> Result<Self, ConfigError> {
        self.api_key_from_lookup(|name| std::env::var(name).ok())
    }

    fn api_key_from_lookup(
        mut self,
        lookup: impl FnOnce(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if self.api_key.is_some() {
            return Ok(self);
        }
        match lookup(API_TOKEN_ENV_VAR) {
            Some(token) if !token.is_empty() => {
                self.api_key = Some(ApiKey::new(token)?);
            }
            _ => tracing::debug!(
                "{} is not set, BorgBase client will be unauthenticated",
                API_TOKEN_ENV_VAR
            ),
        }
        Ok(self)
    }

    /// Sets a request timeout covering the whole round trip.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`].
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let endpoint = self.endpoint.unwrap_or_else(default_endpoint);

        ClientConfig {
            endpoint,
            api_key: self.api_key,
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        }
    }
}

fn default_endpoint() -> Endpoint {
    match Endpoint::new(DEFAULT_ENDPOINT) {
        Ok(endpoint) => endpoint,
        Err(e) => unreachable!("default endpoint is valid: {e}"),
    }
}
