//! The [`Resource`] trait shared by BorgBase resources.
//!
//! BorgBase exposes the same list/delete pair for every resource kind: a
//! `<kind>List(name: String)` query returning every match, and a
//! `<kind>Delete(id: String!)` mutation returning `{ ok }`. Implementors name
//! the two operations and get [`Resource::list`], [`Resource::find_by_name`]
//! and [`Resource::delete`].

use serde::de::DeserializeOwned;

use crate::clients::graphql::{optional, required, Arguments, GraphqlClient, GraphqlType};
use crate::resources::{DeleteResult, ResourceError};

/// A BorgBase resource that can be listed, looked up by name and deleted.
#[allow(async_fn_in_trait)]
pub trait Resource: GraphqlType + DeserializeOwned + Default + Send + Sync + Sized + 'static {
    /// The type name of the resource, used in error messages.
    const NAME: &'static str;

    /// The list query, e.g. `repoList`.
    const LIST: &'static str;

    /// The delete mutation, e.g. `repoDelete`.
    const DELETE: &'static str;

    /// Returns the server-assigned identifier.
    fn id(&self) -> &str;

    /// Returns the resource's name.
    fn name(&self) -> &str;

    /// Lists resources, optionally filtered by name on the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Client`] if the query fails.
    async fn list(client: &GraphqlClient, name: Option<&str>) -> Result<Vec<Self>, ResourceError> {
        let mut arguments = Arguments::new();
        if let Some(name) = name {
            arguments.insert("name", optional(name.to_string()));
        }

        let mut items: Vec<Self> = Vec::new();
        client.query(Self::LIST, &mut items, &arguments).await?;

        tracing::debug!("Listed {} {} resource(s)", items.len(), Self::NAME);
        Ok(items)
    }

    /// Returns the resource whose name is exactly `name`.
    ///
    /// The server-side filter is not trusted to be exact, so the listed
    /// results are filtered again by name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if no listed resource has that
    /// name, or [`ResourceError::Client`] if the query fails.
    async fn find_by_name(client: &GraphqlClient, name: &str) -> Result<Self, ResourceError> {
        Self::list(client, Some(name))
            .await?
            .into_iter()
            .find(|item| item.name() == name)
            .ok_or_else(|| ResourceError::NotFound {
                resource: Self::NAME,
                name: name.to_string(),
            })
    }

    /// Deletes the resource with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Client`] if the mutation fails.
    async fn delete(client: &GraphqlClient, id: &str) -> Result<DeleteResult, ResourceError> {
        let arguments = Arguments::new().with("id", required(id.to_string()));

        let mut result = DeleteResult::default();
        client.mutation(Self::DELETE, &mut result, &arguments).await?;

        if !result.ok {
            tracing::warn!("{} {} was not confirmed as deleted", Self::NAME, id);
        }
        Ok(result)
    }
}
