//! Errors encountered during API requests or reported by the remote server.
//!
//! Errors are reported as [`anyhow::Error`] chains with the types below attached
//! as root causes or contexts. Use [`anyhow::Error::is`] to check for a specific kind.

/// More than one role matched a lookup by name.
#[derive(Debug, thiserror::Error)]
#[error("found {count} roles named '{name}'")]
pub struct AmbiguousRole {
    /// Number of roles with a matching name.
    pub count: usize,

    /// Name of the role that was looked up.
    pub name: String,
}

/// Unable to authenticate with the Superset API.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unable to obtain a CSRF token for a mutating request.
    #[error("unable to obtain a CSRF token from the Superset API")]
    Csrf,

    /// Unable to log in with the configured credentials.
    #[error("unable to log in to the Superset API as '{0}'")]
    // (username,)
    Login(String),

    /// The server rejected the session credentials.
    #[error("the Superset API rejected the session credentials")]
    Rejected,
}

/// The server returned an empty API response.
#[derive(Debug, thiserror::Error)]
#[error("the server returned an empty API response")]
pub struct EmptyResponse;

/// The server responded with a status code the operation does not expect.
#[derive(Debug, thiserror::Error)]
#[error("{operation} failed with HTTP status code {status}")]
pub struct HttpStatusError {
    /// Name of the operation that failed.
    pub operation: &'static str,

    /// HTTP status code returned by the server.
    pub status: u16,
}

/// Unsupported row level security filter type.
#[derive(Debug, thiserror::Error)]
#[error("unsupported filter type '{value}', expected 'Regular' or 'Base'")]
pub struct InvalidFilterType {
    pub value: String,
}

/// Invalid API response received.
#[derive(Debug, thiserror::Error)]
#[error("invalid API response received: {response}")]
pub struct InvalidResponse {
    pub response: String,
}

/// Error message reported by the server along with a failed request.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
}

/// Error refers to resource with ID.
#[derive(Debug, thiserror::Error)]
#[error("error refers to {resource} '{id}'")]
pub struct ResourceIdentifier {
    /// Identifier of a resource the error refers to.
    pub id: String,

    /// Type of resource the error refers to.
    pub resource: String,
}

impl ResourceIdentifier {
    /// Resource identifier context for the given resource type and id.
    pub fn reference<S1, S2>(resource: S1, id: S2) -> Self
    where
        S1: Into<String>,
        S2: ToString,
    {
        ResourceIdentifier {
            id: id.to_string(),
            resource: resource.into(),
        }
    }
}

/// The resource is not available, or access to it is restricted.
#[derive(Debug, thiserror::Error)]
#[error("the resource is not available, or access to it is restricted")]
pub struct ResourceNotFound;

/// Check if an error, or any of its causes, reports a missing resource.
pub fn is_not_found(error: &anyhow::Error) -> bool {
    error.is::<ResourceNotFound>()
}

/// Check if an error, or any of its causes, reports an authentication rejection.
pub fn is_auth_rejected(error: &anyhow::Error) -> bool {
    matches!(error.downcast_ref::<AuthError>(), Some(AuthError::Rejected))
}
