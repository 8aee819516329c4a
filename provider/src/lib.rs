//! Declarative resources and data sources to manage Apache Superset security entities.
//!
//! The host lifecycle framework drives the [`Resource`] and [`DataSource`] callbacks
//! exposed by a configured [`Provider`]:
//!
//! - `superset_user`: [`UserResource`](resources::UserResource).
//! - `superset_row_level_security`: [`RowLevelSecurityResource`](resources::RowLevelSecurityResource).
//! - `superset_users`: [`UsersDataSource`](data_sources::UsersDataSource).
//! - `superset_role`: [`RoleDataSource`](data_sources::RoleDataSource).
mod context;
mod provider;
mod reconcile;
mod resource;

pub mod conf;
pub mod data_sources;
pub mod errors;
pub mod resources;

#[cfg(test)]
mod tests;

pub use self::conf::ProviderConf;
pub use self::context::Context;
pub use self::context::ContextBuilder;
pub use self::provider::Provider;
pub use self::resource::DataSource;
pub use self::resource::Resource;
