//! Read-only data sources exposed by the provider.
mod role;
mod users;

pub use self::role::RoleDataSource;
pub use self::role::RoleDataSourceConfig;
pub use self::role::RoleDataSourceModel;
pub use self::users::UserModel;
pub use self::users::UserRoleModel;
pub use self::users::UsersDataSource;
pub use self::users::UsersDataSourceModel;
