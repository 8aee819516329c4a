//! Entry point for the host framework: configure a client and hand out resources.
use std::sync::Arc;

use anyhow::Result;

use superset_client::Client;
use superset_client_http::ClientOptions;
use superset_client_http::HttpClient;

use crate::data_sources::RoleDataSource;
use crate::data_sources::UsersDataSource;
use crate::resources::RowLevelSecurityResource;
use crate::resources::UserResource;
use crate::Context;
use crate::ProviderConf;

/// Superset provider sharing one API client across all resources and data sources.
#[derive(Clone)]
pub struct Provider {
    client: Arc<Client>,
}

impl Provider {
    /// Configure the provider to manage the Superset server described by `conf`.
    pub fn configure(context: &Context, conf: &ProviderConf) -> Result<Provider> {
        conf.validate()?;
        let options = ClientOptions::from(conf);
        let client = HttpClient::with(options)?;
        slog::info!(
            context.logger, "Configured Superset provider";
            "host" => &conf.host,
            "username" => &conf.username,
        );
        Ok(Provider::with_client(client))
    }

    /// Create a provider around an existing client.
    pub fn with_client<C>(client: C) -> Provider
    where
        C: Into<Client>,
    {
        let client = Arc::new(client.into());
        Provider { client }
    }

    pub fn role_data_source(&self) -> RoleDataSource {
        RoleDataSource::new(Arc::clone(&self.client))
    }

    pub fn row_level_security_resource(&self) -> RowLevelSecurityResource {
        RowLevelSecurityResource::new(Arc::clone(&self.client))
    }

    pub fn user_resource(&self) -> UserResource {
        UserResource::new(Arc::clone(&self.client))
    }

    pub fn users_data_source(&self) -> UsersDataSource {
        UsersDataSource::new(Arc::clone(&self.client))
    }
}
