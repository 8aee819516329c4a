//! The `superset_row_level_security` resource.
use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use superset_client::models::FilterType;
use superset_client::models::RowLevelSecuritySpec;
use superset_client::Client;

use crate::errors::StateWithoutId;
use crate::reconcile;
use crate::Context;
use crate::Resource;

/// Manages row level security rules in Superset.
pub struct RowLevelSecurityResource {
    client: Arc<Client>,
}

impl RowLevelSecurityResource {
    pub const TYPE_NAME: &'static str = "superset_row_level_security";

    pub(crate) fn new(client: Arc<Client>) -> RowLevelSecurityResource {
        RowLevelSecurityResource { client }
    }
}

/// Attributes of a `superset_row_level_security` resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowLevelSecurityResourceModel {
    /// Numeric identifier of the rule, computed on creation.
    #[serde(default)]
    pub id: Option<i64>,

    pub name: String,

    /// IDs of the datasets to apply the rule to.
    pub tables: Vec<i64>,

    /// SQL `WHERE` clause added to queries.
    pub clause: String,

    /// IDs of the roles to apply the rule to.
    #[serde(default)]
    pub role_ids: Option<Vec<i64>>,

    #[serde(default)]
    pub group_key: Option<String>,

    /// Defaults to [`FilterType::Regular`] when not set.
    #[serde(default)]
    pub filter_type: Option<FilterType>,

    #[serde(default)]
    pub description: Option<String>,
}

impl RowLevelSecurityResourceModel {
    fn spec(&self) -> RowLevelSecuritySpec {
        RowLevelSecuritySpec {
            name: self.name.clone(),
            tables: self.tables.clone(),
            clause: self.clause.clone(),
            roles: self.role_ids.clone().unwrap_or_default(),
            group_key: self.group_key.clone().unwrap_or_default(),
            filter_type: self.filter_type.unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
        }
    }
}

#[async_trait::async_trait]
impl Resource for RowLevelSecurityResource {
    type Model = RowLevelSecurityResourceModel;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    async fn create(
        &self,
        context: &Context,
        mut plan: RowLevelSecurityResourceModel,
    ) -> Result<RowLevelSecurityResourceModel> {
        let spec = plan.spec();
        slog::debug!(
            context.logger, "Creating row level security rule";
            "name" => &spec.name,
            "tables" => format!("{:?}", spec.tables),
        );
        let id = self.client.create_row_level_security(&spec).await?;
        plan.id = Some(id);
        plan.filter_type = Some(spec.filter_type);
        slog::debug!(context.logger, "Created row level security rule"; "id" => id);
        Ok(plan)
    }

    async fn read(
        &self,
        context: &Context,
        mut state: RowLevelSecurityResourceModel,
    ) -> Result<RowLevelSecurityResourceModel> {
        let id = state.id.ok_or(StateWithoutId {
            type_name: Self::TYPE_NAME,
        })?;
        let rule = self.client.get_row_level_security(id).await?;
        slog::debug!(
            context.logger, "API returned row level security rule";
            "id" => rule.id,
            "name" => &rule.name,
        );

        state.tables = reconcile::keep_state_order(&state.tables, rule.tables);
        state.role_ids = reconcile::optional_list(&state.role_ids, rule.role_ids);
        state.group_key = reconcile::optional_string(&state.group_key, rule.group_key);
        state.description = reconcile::optional_string(&state.description, rule.description);
        state.filter_type = Some(rule.filter_type);
        state.name = rule.name;
        state.clause = rule.clause;
        Ok(state)
    }

    async fn update(
        &self,
        context: &Context,
        mut plan: RowLevelSecurityResourceModel,
        state: RowLevelSecurityResourceModel,
    ) -> Result<RowLevelSecurityResourceModel> {
        let id = state.id.ok_or(StateWithoutId {
            type_name: Self::TYPE_NAME,
        })?;
        let spec = plan.spec();
        self.client.update_row_level_security(id, &spec).await?;
        plan.id = Some(id);
        plan.filter_type = Some(spec.filter_type);
        slog::debug!(context.logger, "Updated row level security rule"; "id" => id);
        Ok(plan)
    }

    async fn delete(&self, context: &Context, state: RowLevelSecurityResourceModel) -> Result<()> {
        let id = state.id.ok_or(StateWithoutId {
            type_name: Self::TYPE_NAME,
        })?;
        match self.client.delete_row_level_security(id).await {
            Ok(()) => slog::debug!(context.logger, "Deleted row level security rule"; "id" => id),
            Err(error) if superset_client::error::is_not_found(&error) => slog::debug!(
                context.logger, "Row level security rule not found, removing from state";
                "id" => id,
            ),
            Err(error) => return Err(error),
        };
        Ok(())
    }

    async fn import_state(
        &self,
        context: &Context,
        id: &str,
    ) -> Result<RowLevelSecurityResourceModel> {
        let id = crate::errors::parse_import_id(id)?;
        slog::debug!(context.logger, "Importing row level security rule"; "id" => id);
        let state = RowLevelSecurityResourceModel {
            id: Some(id),
            ..Default::default()
        };
        self.read(context, state).await
    }
}
