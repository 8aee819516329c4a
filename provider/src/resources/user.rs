//! The `superset_user` resource.
use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use superset_client::models::UserSpec;
use superset_client::Client;

use crate::errors::MissingPassword;
use crate::errors::StateWithoutId;
use crate::Context;
use crate::Resource;

/// Manages a user in Superset.
pub struct UserResource {
    client: Arc<Client>,
}

impl UserResource {
    pub const TYPE_NAME: &'static str = "superset_user";

    pub(crate) fn new(client: Arc<Client>) -> UserResource {
        UserResource { client }
    }
}

/// Attributes of a `superset_user` resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResourceModel {
    /// Numeric identifier of the user, computed on creation.
    #[serde(default)]
    pub id: Option<i64>,

    /// Username of the user. Changes require the user to be replaced.
    pub username: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    pub email: String,

    /// Required on creation, optional on update: absent or empty keeps the current password.
    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "UserResourceModel::default_active")]
    pub active: bool,

    /// IDs of the roles granted to the user.
    pub roles: Vec<i64>,

    /// RFC 3339 timestamp of the last create or update.
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl UserResourceModel {
    fn default_active() -> bool {
        true
    }

    fn spec(&self) -> UserSpec {
        UserSpec {
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone().unwrap_or_default(),
            active: self.active,
            roles: self.roles.clone(),
        }
    }
}

impl Default for UserResourceModel {
    fn default() -> Self {
        UserResourceModel {
            id: None,
            username: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: None,
            active: UserResourceModel::default_active(),
            roles: Vec::new(),
            last_updated: None,
        }
    }
}

#[async_trait::async_trait]
impl Resource for UserResource {
    type Model = UserResourceModel;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    async fn create(
        &self,
        context: &Context,
        mut plan: UserResourceModel,
    ) -> Result<UserResourceModel> {
        if plan.password.as_deref().unwrap_or_default().is_empty() {
            anyhow::bail!(MissingPassword);
        }
        let id = self.client.create_user(&plan.spec()).await?;
        plan.id = Some(id);
        plan.last_updated = Some(super::now_rfc3339()?);
        slog::debug!(
            context.logger, "Created Superset user";
            "id" => id,
            "username" => &plan.username,
        );
        Ok(plan)
    }

    async fn read(
        &self,
        context: &Context,
        mut state: UserResourceModel,
    ) -> Result<UserResourceModel> {
        let id = state.id.ok_or(StateWithoutId {
            type_name: Self::TYPE_NAME,
        })?;
        let user = self.client.get_user(id).await?;
        slog::debug!(
            context.logger, "API returned user";
            "id" => user.id,
            "username" => &user.username,
        );

        // The password is never returned by the server and is kept from state.
        state.roles = crate::reconcile::keep_state_order(&state.roles, user.role_ids());
        state.username = user.username;
        state.first_name = user.first_name;
        state.last_name = user.last_name;
        state.email = user.email;
        state.active = user.active;
        Ok(state)
    }

    async fn update(
        &self,
        context: &Context,
        mut plan: UserResourceModel,
        state: UserResourceModel,
    ) -> Result<UserResourceModel> {
        let id = state.id.ok_or(StateWithoutId {
            type_name: Self::TYPE_NAME,
        })?;
        self.client.update_user(id, &plan.spec()).await?;
        plan.id = Some(id);
        plan.last_updated = Some(super::now_rfc3339()?);
        slog::debug!(
            context.logger, "Updated Superset user";
            "id" => id,
            "username" => &plan.username,
        );
        Ok(plan)
    }

    async fn delete(&self, context: &Context, state: UserResourceModel) -> Result<()> {
        let id = state.id.ok_or(StateWithoutId {
            type_name: Self::TYPE_NAME,
        })?;
        match self.client.delete_user(id).await {
            Ok(()) => slog::debug!(context.logger, "Deleted Superset user"; "id" => id),
            Err(error) if superset_client::error::is_not_found(&error) => slog::debug!(
                context.logger, "Superset user not found, removing from state";
                "id" => id,
            ),
            Err(error) => return Err(error),
        };
        Ok(())
    }

    async fn import_state(&self, context: &Context, id: &str) -> Result<UserResourceModel> {
        let id = crate::errors::parse_import_id(id)?;
        slog::debug!(context.logger, "Importing Superset user"; "id" => id);
        let state = UserResourceModel {
            id: Some(id),
            ..Default::default()
        };
        self.read(context, state).await
    }
}
