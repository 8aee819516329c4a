//! The `superset_users` data source.
use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use superset_client::models::User;
use superset_client::Client;

use crate::Context;
use crate::DataSource;

/// Fetches the list of users from Superset.
pub struct UsersDataSource {
    client: Arc<Client>,
}

impl UsersDataSource {
    pub const TYPE_NAME: &'static str = "superset_users";

    pub(crate) fn new(client: Arc<Client>) -> UsersDataSource {
        UsersDataSource { client }
    }
}

/// Attributes of the `superset_users` data source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersDataSourceModel {
    pub users: Vec<UserModel>,
}

/// A user listed by the `superset_users` data source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub active: bool,
    pub roles: Vec<UserRoleModel>,
}

/// A role granted to a user listed by the `superset_users` data source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoleModel {
    pub id: i64,
    pub name: String,
}

impl From<User> for UserModel {
    fn from(value: User) -> Self {
        let roles = value
            .roles
            .into_iter()
            .map(|role| UserRoleModel {
                id: role.id,
                name: role.name,
            })
            .collect();
        UserModel {
            id: value.id,
            username: value.username,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            active: value.active,
            roles,
        }
    }
}

#[async_trait::async_trait]
impl DataSource for UsersDataSource {
    type Config = ();
    type Model = UsersDataSourceModel;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    async fn read(&self, context: &Context, _config: ()) -> Result<UsersDataSourceModel> {
        let users = self.client.fetch_users().await?;
        slog::debug!(context.logger, "API returned users"; "count" => users.len());
        let users = users.into_iter().map(UserModel::from).collect();
        Ok(UsersDataSourceModel { users })
    }
}
