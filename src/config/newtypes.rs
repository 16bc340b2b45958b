//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use std::fmt;

use reqwest::header::HeaderValue;
use reqwest::Url;

use crate::error::ConfigError;

/// A validated BorgBase API token.
///
/// The token must be non-empty and consist of visible ASCII characters so it
/// can always be carried in an `Authorization` header. The header value is
/// computed once on construction and marked sensitive.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `ApiKey(*****)` instead of the actual value.
///
/// # Example
///
/// ```rust
/// use borgbase_api::ApiKey;
///
/// let key = ApiKey::new("my-token").unwrap();
/// assert_eq!(key.as_ref(), "my-token");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    key: String,
    authorization: HeaderValue,
}

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty, or
    /// [`ConfigError::InvalidApiKey`] if it contains whitespace, control or
    /// non-ASCII characters.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if !key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(ConfigError::InvalidApiKey);
        }

        let mut authorization = HeaderValue::from_str(&format!("bearer {key}"))
            .map_err(|_| ConfigError::InvalidApiKey)?;
        authorization.set_sensitive(true);

        Ok(Self { key, authorization })
    }

    /// Returns the `Authorization` header value (`bearer <key>`).
    pub(crate) const fn authorization(&self) -> &HeaderValue {
        &self.authorization
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated GraphQL endpoint URL.
///
/// Only `http` and `https` URLs with a non-empty host are accepted.
///
/// # Example
///
/// ```rust
/// use borgbase_api::Endpoint;
///
/// let endpoint = Endpoint::new("https://api.borgbase.com/graphql").unwrap();
/// assert_eq!(endpoint.host_name(), Some("api.borgbase.com"));
/// assert_eq!(endpoint.as_ref(), "https://api.borgbase.com/graphql");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint(Url);

impl Endpoint {
    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL cannot be parsed,
    /// uses a scheme other than `http`/`https`, or has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();
        let invalid = || ConfigError::InvalidEndpoint {
            url: trimmed.to_string(),
        };

        let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid());
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(invalid());
        }

        Ok(Self(parsed))
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.0
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
