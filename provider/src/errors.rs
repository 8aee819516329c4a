//! Errors reported by the provider lifecycle callbacks.
use anyhow::Context;
use anyhow::Result;

/// The ID given to an import operation is not a valid numeric ID.
#[derive(Debug, thiserror::Error)]
#[error("the import ID '{id}' is not a valid numeric identifier")]
pub struct InvalidImportId {
    pub id: String,
}

/// A password is required when creating a new user.
#[derive(Debug, thiserror::Error)]
#[error("a password is required when creating a new user")]
pub struct MissingPassword;

/// The known state of a resource does not record its ID.
#[derive(Debug, thiserror::Error)]
#[error("the state of {type_name} resource has no ID")]
pub struct StateWithoutId {
    pub type_name: &'static str,
}

/// Parse the ID given to an import operation.
pub fn parse_import_id(id: &str) -> Result<i64> {
    id.trim()
        .parse::<i64>()
        .with_context(|| InvalidImportId { id: id.to_string() })
}
