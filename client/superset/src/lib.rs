//! Async client library to manage Apache Superset security entities.
//!
//! The [`Client`] exposes one method per entity operation and delegates the work
//! to an [`ISuperset`] implementation, such as the HTTP client or the test fixture.
use anyhow::Result;

pub mod error;
pub mod models;

#[cfg(any(test, feature = "test-fixture"))]
pub mod fixture;

use self::models::RowLevelSecurity;
use self::models::RowLevelSecuritySpec;
use self::models::User;
use self::models::UserSpec;

/// Async API client to a Superset instance.
pub struct Client {
    backend: Box<dyn ISuperset>,
}

impl Client {
    /// Create a user and return its new ID.
    pub async fn create_user(&self, user: &UserSpec) -> Result<i64> {
        self.backend.create_user(user).await
    }

    /// Fetch a user by ID.
    pub async fn get_user(&self, id: i64) -> Result<User> {
        self.backend.get_user(id).await
    }

    /// Update a user, leaving the password unchanged if the given password is empty.
    pub async fn update_user(&self, id: i64, user: &UserSpec) -> Result<()> {
        self.backend.update_user(id, user).await
    }

    /// Delete a user by ID.
    pub async fn delete_user(&self, id: i64) -> Result<()> {
        self.backend.delete_user(id).await
    }

    /// List all users, in server order.
    pub async fn fetch_users(&self) -> Result<Vec<User>> {
        self.backend.fetch_users().await
    }

    /// Create a row level security rule and return its new ID.
    pub async fn create_row_level_security(&self, rule: &RowLevelSecuritySpec) -> Result<i64> {
        self.backend.create_row_level_security(rule).await
    }

    /// Fetch a row level security rule by ID.
    pub async fn get_row_level_security(&self, id: i64) -> Result<RowLevelSecurity> {
        self.backend.get_row_level_security(id).await
    }

    /// Update a row level security rule.
    pub async fn update_row_level_security(
        &self,
        id: i64,
        rule: &RowLevelSecuritySpec,
    ) -> Result<()> {
        self.backend.update_row_level_security(id, rule).await
    }

    /// Delete a row level security rule by ID.
    pub async fn delete_row_level_security(&self, id: i64) -> Result<()> {
        self.backend.delete_row_level_security(id).await
    }

    /// Find the ID of the role with the given name.
    pub async fn get_role_id_by_name(&self, name: &str) -> Result<i64> {
        self.backend.get_role_id_by_name(name).await
    }
}

impl<S> From<S> for Client
where
    S: ISuperset + 'static,
{
    fn from(value: S) -> Self {
        let backend = Box::new(value);
        Client { backend }
    }
}

/// Interface to Superset API clients.
///
/// Implementations report failures with the types in [`error`] attached to the returned errors:
///
/// - Missing entities are reported with [`ResourceNotFound`](error::ResourceNotFound).
/// - Authentication failures are reported with [`AuthError`](error::AuthError).
/// - Role lookups matching multiple roles fail with [`AmbiguousRole`](error::AmbiguousRole).
#[async_trait::async_trait]
pub trait ISuperset: Send + Sync {
    /// Create a user and return its new ID.
    async fn create_user(&self, user: &UserSpec) -> Result<i64>;

    /// Fetch a user by ID.
    async fn get_user(&self, id: i64) -> Result<User>;

    /// Update a user, leaving the password unchanged if the given password is empty.
    async fn update_user(&self, id: i64, user: &UserSpec) -> Result<()>;

    /// Delete a user by ID.
    async fn delete_user(&self, id: i64) -> Result<()>;

    /// List all users, in server order.
    async fn fetch_users(&self) -> Result<Vec<User>>;

    /// Create a row level security rule and return its new ID.
    async fn create_row_level_security(&self, rule: &RowLevelSecuritySpec) -> Result<i64>;

    /// Fetch a row level security rule by ID.
    async fn get_row_level_security(&self, id: i64) -> Result<RowLevelSecurity>;

    /// Update a row level security rule.
    async fn update_row_level_security(&self, id: i64, rule: &RowLevelSecuritySpec)
        -> Result<()>;

    /// Delete a row level security rule by ID.
    async fn delete_row_level_security(&self, id: i64) -> Result<()>;

    /// Find the ID of the role with the given name.
    async fn get_role_id_by_name(&self, name: &str) -> Result<i64>;
}
