//! Data object storing the provider's configuration.
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use superset_client_http::ClientOptions;

use super::Error;

/// Environment variable overriding the Superset server address.
pub const ENV_HOST: &str = "SUPERSET_HOST";

/// Environment variable overriding the password to log in with.
pub const ENV_PASSWORD: &str = "SUPERSET_PASSWORD";

/// Environment variable overriding the username to log in with.
pub const ENV_USERNAME: &str = "SUPERSET_USERNAME";

/// Configuration of the connection to a Superset server.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConf {
    /// Address of the Superset server, such as `https://superset.example.com`.
    #[serde(default)]
    pub host: String,

    /// Password to log in with.
    #[serde(default)]
    pub password: String,

    /// Timeout, in seconds, for requests to the server.
    #[serde(default = "ProviderConf::default_timeout")]
    pub timeout: u64,

    /// Timeout, in seconds, to establish new connections to the server.
    #[serde(default = "ProviderConf::default_timeout_connect")]
    pub timeout_connect: u64,

    /// Username to log in with.
    #[serde(default)]
    pub username: String,
}

impl ProviderConf {
    fn default_timeout() -> u64 {
        30
    }

    fn default_timeout_connect() -> u64 {
        5
    }

    /// Override configured values with the values of the process environment variables.
    pub fn env_overrides(self) -> ProviderConf {
        self.overrides_from(|name| std::env::var(name).ok())
    }

    /// Override configured values with non-empty values returned by `lookup`.
    pub fn overrides_from<F>(mut self, lookup: F) -> ProviderConf
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = password;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = username;
        }
        self
    }

    /// Check the configuration holds enough information to connect to the server.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            anyhow::bail!(Error::MissingAttribute("host"));
        }
        if self.username.is_empty() {
            anyhow::bail!(Error::MissingAttribute("username"));
        }
        Ok(())
    }
}

impl Default for ProviderConf {
    fn default() -> Self {
        ProviderConf {
            host: String::new(),
            password: String::new(),
            timeout: ProviderConf::default_timeout(),
            timeout_connect: ProviderConf::default_timeout_connect(),
            username: String::new(),
        }
    }
}

impl std::fmt::Debug for ProviderConf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConf")
            .field("host", &self.host)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("timeout_connect", &self.timeout_connect)
            .field("username", &self.username)
            .finish()
    }
}

impl From<&ProviderConf> for ClientOptions {
    fn from(value: &ProviderConf) -> Self {
        ClientOptions::url(value.host.clone())
            .credentials(value.username.clone(), value.password.clone())
            .timeout(Duration::from_secs(value.timeout))
            .timeout_connect(Duration::from_secs(value.timeout_connect))
            .client()
    }
}
