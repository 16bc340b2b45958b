//! SshKey resource implementation.
//!
//! SSH keys are registered once per account and then granted access to
//! repositories by ID (see [`RepoSettings`](crate::resources::RepoSettings)).
//! Keys cannot be edited; replace them with [`SshKey::create`] and
//! [`Resource::delete`].

use serde::Deserialize;

use crate::clients::graphql::{optional, Arguments, GraphqlClient};
use crate::resources::{Resource, ResourceError};

crate::graphql_object! {
    /// An SSH public key registered with BorgBase.
    #[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
    #[serde(default)]
    pub struct SshKey {
        /// Key identifier, as used in repository access lists.
        pub id: String,
        pub name: String,
        #[serde(rename = "addedAt", deserialize_with = "super::null_as_default")]
        pub added_at: String,
        /// Key size in bits.
        pub bits: i64,
        #[serde(rename = "hashMd5", deserialize_with = "super::null_as_default")]
        pub hash_md5: String,
        #[serde(rename = "hashSha256", deserialize_with = "super::null_as_default")]
        pub hash_sha256: String,
        #[serde(rename = "lastUsedAt")]
        pub last_used_at: Option<String>,
        /// Base64 key material prefixed with the key type, without the comment.
        #[serde(rename = "keyData")]
        pub key_data: String,
        /// Key algorithm, e.g. `ssh-ed25519`.
        #[serde(rename = "keyType", deserialize_with = "super::null_as_default")]
        pub key_type: String,
        #[serde(deserialize_with = "super::null_as_default")]
        pub comment: String,
    }
}

crate::graphql_object! {
    /// Result of the `sshAdd` mutation.
    #[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
    #[serde(default)]
    pub struct KeyAdded {
        #[serde(rename = "keyAdded")]
        pub key_added: SshKey,
    }
}

impl SshKey {
    /// Returns the key in `authorized_keys` form: the key data followed by
    /// the comment, if any.
    ///
    /// # Example
    ///
    /// ```rust
    /// use borgbase_api::resources::SshKey;
    ///
    /// let key = SshKey {
    ///     key_data: "ssh-ed25519 AAAAC3Nz".to_string(),
    ///     comment: "me@laptop".to_string(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(key.public_key(), "ssh-ed25519 AAAAC3Nz me@laptop");
    /// ```
    #[must_use]
    pub fn public_key(&self) -> String {
        if self.comment.is_empty() {
            self.key_data.clone()
        } else {
            format!("{} {}", self.key_data, self.comment)
        }
    }

    /// Registers a new key.
    ///
    /// `public_key` is the full `authorized_keys` line; the server splits off
    /// the comment.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Client`] if the mutation fails.
    pub async fn create(
        client: &GraphqlClient,
        name: &str,
        public_key: &str,
    ) -> Result<Self, ResourceError> {
        let arguments = Arguments::new()
            .with("name", optional(name.to_string()))
            .with("keyData", optional(public_key.to_string()));

        let mut payload = KeyAdded::default();
        client.mutation("sshAdd", &mut payload, &arguments).await?;

        tracing::debug!("Created SshKey {} with id {}", name, payload.key_added.id);
        Ok(payload.key_added)
    }
}

impl Resource for SshKey {
    const NAME: &'static str = "SshKey";
    const LIST: &'static str = "sshList";
    const DELETE: &'static str = "sshDelete";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
