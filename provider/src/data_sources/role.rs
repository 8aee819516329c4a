//! The `superset_role` data source.
use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use superset_client::Client;

use crate::Context;
use crate::DataSource;

/// Fetches a role by name from Superset.
pub struct RoleDataSource {
    client: Arc<Client>,
}

impl RoleDataSource {
    pub const TYPE_NAME: &'static str = "superset_role";

    pub(crate) fn new(client: Arc<Client>) -> RoleDataSource {
        RoleDataSource { client }
    }
}

/// Arguments of the `superset_role` data source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDataSourceConfig {
    /// Name of the role to fetch.
    pub name: String,
}

/// Attributes of the `superset_role` data source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDataSourceModel {
    pub id: i64,
    pub name: String,
}

#[async_trait::async_trait]
impl DataSource for RoleDataSource {
    type Config = RoleDataSourceConfig;
    type Model = RoleDataSourceModel;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    async fn read(
        &self,
        context: &Context,
        config: RoleDataSourceConfig,
    ) -> Result<RoleDataSourceModel> {
        let id = self.client.get_role_id_by_name(&config.name).await?;
        slog::debug!(
            context.logger, "Found Superset role";
            "id" => id,
            "name" => &config.name,
        );
        Ok(RoleDataSourceModel {
            id,
            name: config.name,
        })
    }
}
