//! Request transports.
//!
//! A [`Transport`] performs exactly one HTTP exchange. [`reqwest::Client`] is
//! the base transport; [`AuthedTransport`] decorates another transport with a
//! bearer token.
//!
//! Transports never retry: one call sends one request.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Request, Response};

use crate::config::ApiKey;

/// A single-shot HTTP round trip.
///
/// Implementations must be safe to share between concurrent callers.
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    /// Sends `request` and returns the response headers with an unread body.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`reqwest::Error`] for connection, TLS or
    /// timeout failures.
    async fn round_trip(&self, request: Request) -> Result<Response, reqwest::Error>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn round_trip(&self, request: Request) -> Result<Response, reqwest::Error> {
        self.execute(request).await
    }
}

/// A transport that sets `Authorization: bearer <key>` on every request.
///
/// Any `Authorization` header already present on the request is replaced.
///
/// # Example
///
/// ```rust
/// use borgbase_api::clients::AuthedTransport;
/// use borgbase_api::ApiKey;
///
/// let transport = AuthedTransport::new(&ApiKey::new("token").unwrap(), reqwest::Client::new());
/// ```
#[derive(Clone, Debug)]
pub struct AuthedTransport<T = reqwest::Client> {
    api_key: ApiKey,
    wrapped: T,
}

impl<T: Transport> AuthedTransport<T> {
    /// Wraps `wrapped`, authenticating with `api_key`.
    #[must_use]
    pub fn new(api_key: &ApiKey, wrapped: T) -> Self {
        Self {
            api_key: api_key.clone(),
            wrapped,
        }
    }

    /// Returns the wrapped transport.
    #[must_use]
    pub const fn inner(&self) -> &T {
        &self.wrapped
    }
}

#[async_trait]
impl<T: Transport> Transport for AuthedTransport<T> {
    async fn round_trip(&self, mut request: Request) -> Result<Response, reqwest::Error> {
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.api_key.authorization().clone());
        self.wrapped.round_trip(request).await
    }
}
