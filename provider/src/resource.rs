//! Interfaces between the host lifecycle framework and the provider.
use anyhow::Result;

use crate::Context;

/// A declaratively managed entity with a create/read/update/delete/import lifecycle.
///
/// Models are plain values: callbacks receive the desired (plan) or known (state)
/// model and return the new state to record.
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    /// Attributes of the resource as recorded in plans and state.
    type Model: Send + Sync + 'static;

    /// Name of the resource type, such as `superset_user`.
    fn type_name(&self) -> &'static str;

    /// Create the resource and return the initial state.
    async fn create(&self, context: &Context, plan: Self::Model) -> Result<Self::Model>;

    /// Refresh the state with the latest attributes on the server.
    async fn read(&self, context: &Context, state: Self::Model) -> Result<Self::Model>;

    /// Update the resource to match the plan and return the new state.
    async fn update(
        &self,
        context: &Context,
        plan: Self::Model,
        state: Self::Model,
    ) -> Result<Self::Model>;

    /// Delete the resource. Resources already gone from the server are not an error.
    async fn delete(&self, context: &Context, state: Self::Model) -> Result<()>;

    /// Build the state of an existing resource from its ID.
    async fn import_state(&self, context: &Context, id: &str) -> Result<Self::Model>;
}

/// A read-only view of server entities.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Arguments given to the data source.
    type Config: Send + Sync + 'static;

    /// Attributes returned by the data source.
    type Model: Send + Sync + 'static;

    /// Name of the data source type, such as `superset_users`.
    fn type_name(&self) -> &'static str;

    /// Read the data source.
    async fn read(&self, context: &Context, config: Self::Config) -> Result<Self::Model>;
}
