//! Provider configuration object and helpers.
mod loading;
mod object;

pub use self::loading::load;
pub use self::loading::Error;
pub use self::object::ProviderConf;
pub use self::object::ENV_HOST;
pub use self::object::ENV_PASSWORD;
pub use self::object::ENV_USERNAME;
