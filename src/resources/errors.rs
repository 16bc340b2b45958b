//! Error types for BorgBase resource operations.

use thiserror::Error;

use crate::clients::ClientError;

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use borgbase_api::resources::ResourceError;
///
/// let error = ResourceError::NotFound {
///     resource: "BorgRepo",
///     name: "laptop".to_string(),
/// };
/// assert_eq!(error.to_string(), "BorgRepo named laptop not found");
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource with the requested name exists.
    #[error("{resource} named {name} not found")]
    NotFound {
        /// The type name of the resource (e.g., "BorgRepo", "SshKey").
        resource: &'static str,
        /// The name that was looked up.
        name: String,
    },

    /// The underlying GraphQL call failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ResourceError {
    /// Returns `true` if the error is [`ResourceError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
