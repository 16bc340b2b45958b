//! Typed BorgBase API resources.
//!
//! This module maps the BorgBase GraphQL API onto Rust types:
//!
//! - [`BorgRepo`]: backup repositories (`repoList`, `repoAdd`, `repoEdit`, `repoDelete`)
//! - [`SshKey`]: SSH public keys (`sshList`, `sshAdd`, `sshDelete`)
//! - [`Resource`]: the list/find/delete operations both share
//!
//! Payload types are declared with [`graphql_object!`](crate::graphql_object),
//! so their selection sets follow the field declarations.
//!
//! # Example
//!
//! ```rust,no_run
//! use borgbase_api::resources::{BorgRepo, RepoSettings, Resource};
//! use borgbase_api::{ClientConfig, GraphqlClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GraphqlClient::new(&ClientConfig::from_env()?);
//!
//! let settings = RepoSettings {
//!     alert_days: Some(2),
//!     append_only: Some(true),
//!     ..Default::default()
//! };
//! let repo = BorgRepo::create(&client, "laptop", "eu", &settings).await?;
//!
//! let found = BorgRepo::find_by_name(&client, "laptop").await?;
//! assert_eq!(found.id, repo.id);
//!
//! BorgRepo::delete(&client, &repo.id).await?;
//! # Ok(())
//! # }
//! ```

mod borg_repo;
mod errors;
mod resource;
mod ssh_key;

use serde::{Deserialize, Deserializer};

pub use borg_repo::{BorgRepo, Compaction, RepoAdded, RepoEdited, RepoServer, RepoSettings};
pub use errors::ResourceError;
pub use resource::Resource;
pub use ssh_key::{KeyAdded, SshKey};

crate::graphql_object! {
    /// Result of a `*Delete` mutation.
    #[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
    #[serde(default)]
    pub struct DeleteResult {
        /// Whether the server deleted the resource.
        pub ok: bool,
    }
}

/// Deserializes `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
