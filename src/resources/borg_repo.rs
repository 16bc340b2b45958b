//! BorgRepo resource implementation.
//!
//! A [`BorgRepo`] is a backup repository hosted on a BorgBase server. Besides
//! the shared [`Resource`] operations it supports [`BorgRepo::create`]
//! (`repoAdd`) and [`BorgRepo::update`] (`repoEdit`), both of which accept
//! [`RepoSettings`].
//!
//! # Settings
//!
//! Every setting is optional. Unset settings are left out of the request, so
//! the server keeps its default (on create) or the current value (on update).
//! Compaction settings travel together: setting [`RepoSettings::compaction`]
//! sends all five compaction arguments.

use serde::Deserialize;

use crate::clients::graphql::{optional, required, Arguments, GraphqlClient};
use crate::resources::{Resource, ResourceError};

crate::graphql_object! {
    /// The server hosting a repository.
    #[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
    #[serde(default)]
    pub struct RepoServer {
        /// Server identifier.
        pub id: String,
        /// Host name used in repository URLs.
        pub hostname: String,
        /// Region code, e.g. `eu` or `us`.
        pub region: String,
        /// Whether the server accepts new repositories from any account.
        pub public: bool,
        /// Human-readable data center location.
        #[serde(deserialize_with = "super::null_as_default")]
        pub location: String,
        #[serde(rename = "fingerprintRsa", deserialize_with = "super::null_as_default")]
        pub fingerprint_rsa: String,
        #[serde(rename = "fingerprintEcdsa", deserialize_with = "super::null_as_default")]
        pub fingerprint_ecdsa: String,
        #[serde(rename = "fingerprintEd25519", deserialize_with = "super::null_as_default")]
        pub fingerprint_ed25519: String,
    }
}

crate::graphql_object! {
    /// A BorgBase backup repository.
    #[derive(Clone, Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct BorgRepo {
        /// Repository identifier.
        pub id: String,
        /// Repository name, unique per account.
        pub name: String,
        /// The server hosting the repository.
        pub server: RepoServer,
        /// Quota in MB.
        pub quota: i64,
        #[serde(rename = "quotaEnabled")]
        pub quota_enabled: bool,
        /// Days without a backup before an alert is sent. Zero disables alerts.
        #[serde(rename = "alertDays")]
        pub alert_days: i64,
        pub region: String,
        /// Repository format, e.g. `borg1` or `restic`.
        pub format: String,
        #[serde(rename = "borgVersion", deserialize_with = "super::null_as_default")]
        pub borg_version: String,
        #[serde(rename = "resticVersion")]
        pub restic_version: Option<String>,
        pub htpasswd: Option<String>,
        #[serde(rename = "appendOnly")]
        pub append_only: bool,
        /// IDs of SSH keys with append-only access.
        #[serde(rename = "appendOnlyKeys", deserialize_with = "super::null_as_default")]
        pub append_only_keys: Vec<String>,
        /// IDs of SSH keys with full access.
        #[serde(rename = "fullAccessKeys", deserialize_with = "super::null_as_default")]
        pub full_access_keys: Vec<String>,
        /// IDs of SSH keys allowed to rsync.
        #[serde(rename = "rsyncKeys", deserialize_with = "super::null_as_default")]
        pub rsync_keys: Vec<String>,
        #[serde(rename = "sftpEnabled")]
        pub sftp_enabled: bool,
        #[serde(deserialize_with = "super::null_as_default")]
        pub encryption: String,
        #[serde(rename = "createdAt", deserialize_with = "super::null_as_default")]
        pub created_at: String,
        #[serde(rename = "lastModified")]
        pub last_modified: Option<String>,
        #[serde(rename = "compactionEnabled")]
        pub compaction_enabled: bool,
        #[serde(rename = "compactionInterval")]
        pub compaction_interval: i64,
        #[serde(rename = "compactionIntervalUnit", deserialize_with = "super::null_as_default")]
        pub compaction_interval_unit: String,
        #[serde(rename = "compactionHour")]
        pub compaction_hour: i64,
        #[serde(rename = "compactionHourTimezone", deserialize_with = "super::null_as_default")]
        pub compaction_hour_timezone: String,
        /// Path to use in the repository URL.
        #[serde(rename = "repoPath")]
        pub repo_path: String,
        /// Current usage in MB.
        #[serde(rename = "currentUsage")]
        pub current_usage: f64,
    }
}

crate::graphql_object! {
    /// Result of the `repoAdd` mutation.
    #[derive(Clone, Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct RepoAdded {
        #[serde(rename = "repoAdded")]
        pub repo_added: BorgRepo,
    }
}

crate::graphql_object! {
    /// Result of the `repoEdit` mutation.
    #[derive(Clone, Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct RepoEdited {
        #[serde(rename = "repoEdited")]
        pub repo_edited: BorgRepo,
    }
}

/// Scheduled compaction of a repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compaction {
    /// Whether compaction runs at all.
    pub enabled: bool,
    /// Hour of day (0-23) in `hour_timezone`.
    pub hour: i64,
    /// IANA time zone name, e.g. `Europe/Berlin`.
    pub hour_timezone: String,
    /// Number of `interval_unit`s between runs.
    pub interval: i64,
    /// Unit of `interval`, e.g. `weeks`.
    pub interval_unit: String,
}

/// Optional repository settings for [`BorgRepo::create`] and [`BorgRepo::update`].
///
/// # Example
///
/// ```rust
/// use borgbase_api::resources::RepoSettings;
///
/// let settings = RepoSettings {
///     quota: Some(500_000),
///     quota_enabled: Some(true),
///     full_access_keys: Some(vec!["1234".to_string()]),
///     ..Default::default()
/// };
///
/// let arguments = settings.to_arguments();
/// assert_eq!(arguments.len(), 3);
/// assert_eq!(arguments.get("quota").unwrap().graphql_type().unwrap(), "Int");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepoSettings {
    pub alert_days: Option<i64>,
    pub quota: Option<i64>,
    pub quota_enabled: Option<bool>,
    pub append_only: Option<bool>,
    pub sftp_enabled: Option<bool>,
    pub borg_version: Option<String>,
    pub compaction: Option<Compaction>,
    pub append_only_keys: Option<Vec<String>>,
    pub full_access_keys: Option<Vec<String>>,
    pub rsync_keys: Option<Vec<String>>,
}

impl RepoSettings {
    /// Adds an optional argument for every setting that is present.
    pub fn apply_to(&self, arguments: &mut Arguments) {
        for (name, value) in [("alertDays", self.alert_days), ("quota", self.quota)] {
            if let Some(value) = value {
                arguments.insert(name, optional(value));
            }
        }

        for (name, value) in [
            ("appendOnly", self.append_only),
            ("sftpEnabled", self.sftp_enabled),
            ("quotaEnabled", self.quota_enabled),
        ] {
            if let Some(value) = value {
                arguments.insert(name, optional(value));
            }
        }

        if let Some(borg_version) = &self.borg_version {
            arguments.insert("borgVersion", optional(borg_version.clone()));
        }

        if let Some(compaction) = &self.compaction {
            arguments.insert("compactionEnabled", optional(compaction.enabled));
            arguments.insert("compactionHour", optional(compaction.hour));
            arguments.insert(
                "compactionHourTimezone",
                optional(compaction.hour_timezone.clone()),
            );
            arguments.insert("compactionInterval", optional(compaction.interval));
            arguments.insert(
                "compactionIntervalUnit",
                optional(compaction.interval_unit.clone()),
            );
        }

        for (name, keys) in [
            ("appendOnlyKeys", &self.append_only_keys),
            ("fullAccessKeys", &self.full_access_keys),
            ("rsyncKeys", &self.rsync_keys),
        ] {
            if let Some(keys) = keys {
                arguments.insert(name, optional(keys.clone()));
            }
        }
    }

    /// Returns the settings as a fresh argument set.
    #[must_use]
    pub fn to_arguments(&self) -> Arguments {
        let mut arguments = Arguments::new();
        self.apply_to(&mut arguments);
        arguments
    }
}

impl Resource for BorgRepo {
    const NAME: &'static str = "BorgRepo";
    const LIST: &'static str = "repoList";
    const DELETE: &'static str = "repoDelete";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl BorgRepo {
    /// Creates a repository named `name` in `region`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Client`] if the mutation fails.
    pub async fn create(
        client: &GraphqlClient,
        name: &str,
        region: &str,
        settings: &RepoSettings,
    ) -> Result<Self, ResourceError> {
        let mut arguments = Arguments::new()
            .with("name", required(name.to_string()))
            .with("region", required(region.to_string()));
        settings.apply_to(&mut arguments);

        let mut payload = RepoAdded::default();
        client.mutation("repoAdd", &mut payload, &arguments).await?;

        tracing::debug!(
            "Created BorgRepo {} with id {}",
            name,
            payload.repo_added.id
        );
        Ok(payload.repo_added)
    }

    /// Updates the repository with identifier `id`, optionally renaming it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Client`] if the mutation fails.
    pub async fn update(
        client: &GraphqlClient,
        id: &str,
        name: Option<&str>,
        settings: &RepoSettings,
    ) -> Result<Self, ResourceError> {
        let mut arguments = Arguments::new().with("id", required(id.to_string()));
        if let Some(name) = name {
            arguments.insert("name", optional(name.to_string()));
        }
        settings.apply_to(&mut arguments);

        let mut payload = RepoEdited::default();
        client.mutation("repoEdit", &mut payload, &arguments).await?;

        tracing::debug!("Updated BorgRepo {}", id);
        Ok(payload.repo_edited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::graphql::{assemble, selection, Operation};
    use serde_json::json;

    const SERVER_FIELDS: &str =
        "id hostname region public location fingerprintRsa fingerprintEcdsa fingerprintEd25519";

    fn repo_fields() -> String {
        format!(
            "id name server {{ {SERVER_FIELDS} }} quota quotaEnabled alertDays region format \
             borgVersion resticVersion htpasswd appendOnly appendOnlyKeys fullAccessKeys \
             rsyncKeys sftpEnabled encryption createdAt lastModified compactionEnabled \
             compactionInterval compactionIntervalUnit compactionHour compactionHourTimezone \
             repoPath currentUsage"
        )
    }

    // === Selection Tests ===

    #[test]
    fn test_borg_repo_selection_uses_api_field_names() {
        assert_eq!(&*selection::<BorgRepo>(), repo_fields());
    }

    #[test]
    fn test_repo_added_selection_nests_repo() {
        assert_eq!(
            &*selection::<RepoAdded>(),
            format!("repoAdded {{ {} }}", repo_fields())
        );
        assert_eq!(
            &*selection::<RepoEdited>(),
            format!("repoEdited {{ {} }}", repo_fields())
        );
    }

    #[test]
    fn test_repo_list_document() {
        let arguments = Arguments::new().with("name", optional("laptop".to_string()));
        let document =
            assemble::<Vec<BorgRepo>>(Operation::Query, BorgRepo::LIST, &arguments).unwrap();

        assert!(document.starts_with("query repoList($name: String) { repoList(name: $name) { id name server { id "));
    }

    // === Settings Tests ===

    #[test]
    fn test_empty_settings_add_no_arguments() {
        assert!(RepoSettings::default().to_arguments().is_empty());
    }

    #[test]
    fn test_full_settings_are_all_optional() {
        let settings = RepoSettings {
            alert_days: Some(3),
            quota: Some(1000),
            quota_enabled: Some(true),
            append_only: Some(false),
            sftp_enabled: Some(true),
            borg_version: Some("LATEST".to_string()),
            compaction: Some(Compaction {
                enabled: true,
                hour: 3,
                hour_timezone: "Europe/Berlin".to_string(),
                interval: 2,
                interval_unit: "weeks".to_string(),
            }),
            append_only_keys: Some(vec!["1".to_string()]),
            full_access_keys: Some(vec![]),
            rsync_keys: Some(vec!["2".to_string(), "3".to_string()]),
        };

        let arguments = settings.to_arguments();
        let declared: Vec<_> = arguments
            .iter()
            .map(|(name, argument)| format!("{name}: {}", argument.graphql_type().unwrap()))
            .collect();

        assert_eq!(
            declared,
            [
                "alertDays: Int",
                "appendOnly: Boolean",
                "appendOnlyKeys: [String]",
                "borgVersion: String",
                "compactionEnabled: Boolean",
                "compactionHour: Int",
                "compactionHourTimezone: String",
                "compactionInterval: Int",
                "compactionIntervalUnit: String",
                "fullAccessKeys: [String]",
                "quota: Int",
                "quotaEnabled: Boolean",
                "rsyncKeys: [String]",
                "sftpEnabled: Boolean",
            ]
        );
        assert_eq!(
            serde_json::Value::Object(arguments.variables().unwrap())["compactionHourTimezone"],
            json!("Europe/Berlin")
        );
    }

    #[test]
    fn test_settings_do_not_override_required_arguments() {
        let mut arguments = Arguments::new().with("id", required("42".to_string()));
        RepoSettings {
            sftp_enabled: Some(true),
            ..Default::default()
        }
        .apply_to(&mut arguments);

        assert!(arguments.get("id").is_some_and(|a| a.is_required()));
        assert_eq!(arguments.len(), 2);
    }

    // === Decoding Tests ===

    #[test]
    fn test_borg_repo_decodes_api_payload() {
        let repo: BorgRepo = serde_json::from_value(json!({
            "id": "a1b2",
            "name": "laptop",
            "server": {
                "id": "7",
                "hostname": "x7.repo.borgbase.com",
                "region": "eu",
                "public": true,
                "location": null,
                "fingerprintEd25519": "SHA256:abc"
            },
            "quota": 500,
            "quotaEnabled": true,
            "alertDays": 2,
            "borgVersion": null,
            "resticVersion": null,
            "appendOnlyKeys": null,
            "fullAccessKeys": ["11", "12"],
            "repoPath": "ab12cd34",
            "currentUsage": 12.5
        }))
        .unwrap();

        assert_eq!(repo.id, "a1b2");
        assert_eq!(repo.server.hostname, "x7.repo.borgbase.com");
        assert_eq!(repo.server.location, "");
        assert_eq!(repo.server.fingerprint_ed25519, "SHA256:abc");
        assert_eq!(repo.alert_days, 2);
        assert!(repo.quota_enabled);
        assert_eq!(repo.borg_version, "");
        assert_eq!(repo.restic_version, None);
        assert!(repo.append_only_keys.is_empty());
        assert_eq!(repo.full_access_keys, ["11", "12"]);
        assert_eq!(repo.repo_path, "ab12cd34");
        assert!((repo.current_usage - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resource_accessors() {
        let repo = BorgRepo {
            id: "1".to_string(),
            name: "laptop".to_string(),
            ..Default::default()
        };
        assert_eq!(Resource::id(&repo), "1");
        assert_eq!(Resource::name(&repo), "laptop");
    }
}
