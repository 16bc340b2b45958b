//! GraphQL executor and client for the BorgBase API.
//!
//! [`execute`] runs one operation over a [`Transport`]; [`GraphqlClient`]
//! bundles a transport with an endpoint and exposes `query` / `mutation`.

use std::sync::Arc;

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Request, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::errors::ClientError;
use crate::clients::graphql::arguments::Arguments;
use crate::clients::graphql::errors::GraphqlErrors;
use crate::clients::graphql::query::{assemble, Operation};
use crate::clients::graphql::schema::GraphqlType;
use crate::clients::transport::{AuthedTransport, Transport};
use crate::config::{ClientConfig, Endpoint};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Request body. `variables` carries the argument object encoded as a JSON
/// string, which is the form the BorgBase server expects.
#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: String,
}

#[derive(Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    errors: Option<GraphqlErrors>,
}

/// Runs one GraphQL operation and decodes the `name` field into `schema`.
///
/// The document is assembled from `T` and `arguments`, posted to `url`
/// through `transport`, and the response envelope is checked in this order:
///
/// 1. a status of 500 or above fails with [`ClientError::ServerFault`]
/// 2. a non-empty `errors` array fails with [`ClientError::Graphql`]
/// 3. an absent or `null` `data.<name>` succeeds without touching `schema`
/// 4. otherwise `data.<name>` replaces `schema`
///
/// Replacement is wholesale: fields missing from the payload are not merged
/// from the old value but take whatever `T`'s `Deserialize` impl gives them
/// (their defaults under `#[serde(default)]`).
///
/// # Errors
///
/// Returns [`ClientError::Assembly`] or [`ClientError::Serialization`] before
/// any request is sent, [`ClientError::Transport`] if the round trip fails,
/// and [`ClientError::Decode`] if the body does not match the envelope or `T`.
///
/// # Panics
///
/// Panics if `T` is not a struct after stripping pointers and lists.
pub async fn execute<T>(
    transport: &dyn Transport,
    url: &Url,
    operation: Operation,
    name: &str,
    schema: &mut T,
    arguments: &Arguments,
) -> Result<(), ClientError>
where
    T: GraphqlType + DeserializeOwned + 'static,
{
    let document = assemble::<T>(operation, name, arguments)?;

    let variables = arguments
        .variables()
        .and_then(|variables| serde_json::to_string(&Value::Object(variables)))
        .map_err(ClientError::Serialization)?;
    let body = serde_json::to_vec(&GraphqlRequest {
        query: &document,
        variables,
    })
    .map_err(ClientError::Serialization)?;

    let mut request = Request::new(Method::POST, url.clone());
    let headers = request.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    *request.body_mut() = Some(body.into());

    tracing::debug!("Sending GraphQL {} {} to {}", operation, name, url);

    let response = transport.round_trip(request).await?;
    let status = response.status().as_u16();
    let text = response.text().await?;

    tracing::debug!("GraphQL {} {} returned status {}", operation, name, status);

    if status >= 500 {
        tracing::warn!(
            "BorgBase API server fault on {} {}: status {}",
            operation,
            name,
            status
        );
        return Err(ClientError::ServerFault { status, body: text });
    }

    let envelope: GraphqlResponse = serde_json::from_str(&text).map_err(ClientError::Decode)?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        tracing::warn!(
            "GraphQL {} {} returned {} error(s): {}",
            operation,
            name,
            errors.len(),
            errors
        );
        return Err(ClientError::Graphql(errors));
    }

    match envelope.data.and_then(|mut data| data.remove(name)) {
        None | Some(Value::Null) => {
            tracing::debug!("GraphQL {} {} returned no data", operation, name);
        }
        Some(payload) => {
            *schema = serde_json::from_value(payload).map_err(ClientError::Decode)?;
        }
    }

    Ok(())
}

/// GraphQL client for the BorgBase API.
///
/// Cloning is cheap; clones share the same transport and connection pool.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,no_run
/// use borgbase_api::{optional, Arguments, ClientConfig, GraphqlClient};
/// use borgbase_api::resources::BorgRepo;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GraphqlClient::new(&ClientConfig::from_env()?);
///
/// let mut repos: Vec<BorgRepo> = Vec::new();
/// client
///     .query(
///         "repoList",
///         &mut repos,
///         &Arguments::new().with("name", optional("laptop")),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct GraphqlClient {
    transport: Arc<dyn Transport>,
    endpoint: Endpoint,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a client from `config`.
    ///
    /// Requests carry a bearer token when the configuration has an API key
    /// and are sent unauthenticated otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}BorgBase API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        let endpoint = config.endpoint().clone();
        match config.api_key() {
            Some(api_key) => Self::with_transport(endpoint, AuthedTransport::new(api_key, client)),
            None => {
                tracing::debug!("Creating unauthenticated BorgBase client for {}", endpoint);
                Self::with_transport(endpoint, client)
            }
        }
    }

    /// Creates a client that sends every request through `transport`.
    #[must_use]
    pub fn with_transport(endpoint: Endpoint, transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            endpoint,
        }
    }

    /// Returns the GraphQL endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Runs `query <name>` and decodes the result into `schema`.
    ///
    /// # Errors
    ///
    /// See [`execute`].
    pub async fn query<T>(
        &self,
        name: &str,
        schema: &mut T,
        arguments: &Arguments,
    ) -> Result<(), ClientError>
    where
        T: GraphqlType + DeserializeOwned + 'static,
    {
        self.execute(Operation::Query, name, schema, arguments)
            .await
    }

    /// Runs `mutation <name>` and decodes the result into `schema`.
    ///
    /// # Errors
    ///
    /// See [`execute`].
    pub async fn mutation<T>(
        &self,
        name: &str,
        schema: &mut T,
        arguments: &Arguments,
    ) -> Result<(), ClientError>
    where
        T: GraphqlType + DeserializeOwned + 'static,
    {
        self.execute(Operation::Mutation, name, schema, arguments)
            .await
    }

    /// Runs an operation of the given kind against this client's endpoint.
    ///
    /// # Errors
    ///
    /// See [`execute`].
    pub async fn execute<T>(
        &self,
        operation: Operation,
        name: &str,
        schema: &mut T,
        arguments: &Arguments,
    ) -> Result<(), ClientError>
    where
        T: GraphqlType + DeserializeOwned + 'static,
    {
        execute(
            self.transport.as_ref(),
            self.endpoint.url(),
            operation,
            name,
            schema,
            arguments,
        )
        .await
    }
}
