//! Mock client implementation for unit tests.
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Context;
use anyhow::Result;

use crate::error::AmbiguousRole;
use crate::error::ResourceIdentifier;
use crate::error::ResourceNotFound;
use crate::models::Role;
use crate::models::RowLevelSecurity;
use crate::models::RowLevelSecuritySpec;
use crate::models::User;
use crate::models::UserSpec;

/// Mock client implementation for unit tests.
///
/// Clones share the same state so tests can inspect the effects of operations
/// performed through a [`Client`](crate::Client) wrapping the fixture.
#[derive(Clone, Default)]
pub struct Client {
    state: Arc<Mutex<ClientState>>,
}

impl Client {
    /// Register a role that users and rules can reference.
    pub fn append_role<S>(&self, id: i64, name: S)
    where
        S: Into<String>,
    {
        let name = name.into();
        self.state.lock().unwrap().roles.push(Role { id, name });
    }

    /// Password currently stored for a user, if the user exists.
    pub fn password(&self, id: i64) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.users.get(&id).map(|user| user.password.clone())
    }

    /// Row level security rule currently stored, if it exists.
    pub fn rule(&self, id: i64) -> Option<RowLevelSecurity> {
        self.state.lock().unwrap().rules.get(&id).cloned()
    }

    /// Replace the roles of a stored user, simulating out-of-band changes.
    pub fn set_user_roles(&self, id: i64, roles: Vec<i64>) {
        let mut state = self.state.lock().unwrap();
        if let Some(user) = state.users.get_mut(&id) {
            user.spec.roles = roles;
        }
    }

    /// Replace the tables of a stored rule, simulating out-of-band changes.
    pub fn set_rule_tables(&self, id: i64, tables: Vec<i64>) {
        let mut state = self.state.lock().unwrap();
        if let Some(rule) = state.rules.get_mut(&id) {
            rule.tables = tables;
        }
    }
}

#[async_trait::async_trait]
impl super::ISuperset for Client {
    async fn create_user(&self, user: &UserSpec) -> Result<i64> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let stored = StoredUser {
            password: user.password.clone(),
            spec: user.clone(),
        };
        state.users.insert(id, stored);
        Ok(id)
    }

    async fn get_user(&self, id: i64) -> Result<User> {
        let state = self.state.lock().unwrap();
        let user = state
            .users
            .get(&id)
            .ok_or(ResourceNotFound)
            .with_context(|| ResourceIdentifier::reference("user", id))?;
        Ok(state.user_record(id, user))
    }

    async fn update_user(&self, id: i64, user: &UserSpec) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .users
            .get_mut(&id)
            .ok_or(ResourceNotFound)
            .with_context(|| ResourceIdentifier::reference("user", id))?;
        if !user.password.is_empty() {
            stored.password = user.password.clone();
        }
        stored.spec = user.clone();
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state
            .users
            .remove(&id)
            .ok_or(ResourceNotFound)
            .with_context(|| ResourceIdentifier::reference("user", id))?;
        Ok(())
    }

    async fn fetch_users(&self) -> Result<Vec<User>> {
        let state = self.state.lock().unwrap();
        let users = state
            .users
            .iter()
            .map(|(id, user)| state.user_record(*id, user))
            .collect();
        Ok(users)
    }

    async fn create_row_level_security(&self, rule: &RowLevelSecuritySpec) -> Result<i64> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.rules.insert(id, rule_record(id, rule));
        Ok(id)
    }

    async fn get_row_level_security(&self, id: i64) -> Result<RowLevelSecurity> {
        let state = self.state.lock().unwrap();
        let rule = state
            .rules
            .get(&id)
            .cloned()
            .ok_or(ResourceNotFound)
            .with_context(|| ResourceIdentifier::reference("row level security rule", id))?;
        Ok(rule)
    }

    async fn update_row_level_security(&self, id: i64, rule: &RowLevelSecuritySpec) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .rules
            .get_mut(&id)
            .ok_or(ResourceNotFound)
            .with_context(|| ResourceIdentifier::reference("row level security rule", id))?;
        *stored = rule_record(id, rule);
        Ok(())
    }

    async fn delete_row_level_security(&self, id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state
            .rules
            .remove(&id)
            .ok_or(ResourceNotFound)
            .with_context(|| ResourceIdentifier::reference("row level security rule", id))?;
        Ok(())
    }

    async fn get_role_id_by_name(&self, name: &str) -> Result<i64> {
        let state = self.state.lock().unwrap();
        let matches: Vec<&Role> = state.roles.iter().filter(|role| role.name == name).collect();
        match matches.as_slice() {
            [] => Err(anyhow::anyhow!(ResourceNotFound))
                .with_context(|| ResourceIdentifier::reference("role", name)),
            [role] => Ok(role.id),
            many => anyhow::bail!(AmbiguousRole {
                count: many.len(),
                name: name.to_string(),
            }),
        }
    }
}

/// Internal state to implement Superset mocking.
#[derive(Default)]
struct ClientState {
    last_id: i64,
    roles: Vec<Role>,
    rules: BTreeMap<i64, RowLevelSecurity>,
    users: BTreeMap<i64, StoredUser>,
}

impl ClientState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn user_record(&self, id: i64, user: &StoredUser) -> User {
        let roles = user
            .spec
            .roles
            .iter()
            .map(|role_id| {
                let name = self
                    .roles
                    .iter()
                    .find(|role| role.id == *role_id)
                    .map(|role| role.name.clone())
                    .unwrap_or_default();
                Role { id: *role_id, name }
            })
            .collect();
        User {
            id,
            username: user.spec.username.clone(),
            first_name: user.spec.first_name.clone(),
            last_name: user.spec.last_name.clone(),
            email: user.spec.email.clone(),
            active: user.spec.active,
            roles,
        }
    }
}

struct StoredUser {
    password: String,
    spec: UserSpec,
}

fn rule_record(id: i64, rule: &RowLevelSecuritySpec) -> RowLevelSecurity {
    RowLevelSecurity {
        id,
        name: rule.name.clone(),
        clause: rule.clause.clone(),
        group_key: rule.group_key.clone(),
        filter_type: rule.filter_type,
        description: rule.description.clone(),
        tables: rule.tables.clone(),
        role_ids: rule.roles.clone(),
    }
}
