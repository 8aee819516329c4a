//! Load configuration from files.
use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;

use super::ProviderConf;

/// Errors handling provider configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unable to decode configuration from file at the given path.
    #[error("unable to decode configuration from file at '{0}'")]
    // (path,)
    Decode(String),

    /// A required configuration attribute is not set.
    #[error("the '{0}' configuration attribute is required")]
    // (attribute,)
    MissingAttribute(&'static str),

    /// Unable to read configuration file at the given path.
    #[error("unable to read configuration file at '{0}'")]
    // (path,)
    Open(String),

    /// Configuration file not found at the given path.
    #[error("configuration file not found at '{0}'")]
    // (path,)
    PathNotFound(String),
}

/// Load provider configuration from the specified path.
///
/// Values from the process environment take precedence over the file.
pub fn load(path: &str) -> Result<ProviderConf> {
    if !PathBuf::from(path).exists() {
        let error = Error::PathNotFound(path.to_string());
        let error = anyhow::anyhow!(error);
        return Err(error);
    }

    let file = File::open(path).with_context(|| Error::Open(path.into()))?;
    let conf: ProviderConf =
        serde_yaml::from_reader(file).with_context(|| Error::Decode(path.into()))?;
    Ok(conf.env_overrides())
}
