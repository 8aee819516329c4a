//! Superset API client for the HTTP(S) protocol.
use anyhow::Result;
use reqwest::Client as ReqwestClient;
use reqwest::RequestBuilder;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use superset_client::error::EmptyResponse;
use superset_client::error::InvalidResponse;
use superset_client::models::RowLevelSecurity;
use superset_client::models::RowLevelSecuritySpec;
use superset_client::models::User;
use superset_client::models::UserSpec;
use superset_client::ISuperset;

mod config;
mod rls;
mod roles;
mod users;

pub mod error;
pub mod session;

#[cfg(test)]
mod tests;

pub use self::config::ClientOptions;
pub use self::config::ClientOptionsBuilder;

use self::session::Session;

/// String to set as the user agent in HTTP request.
static CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Status codes accepted from create requests.
const EXPECT_CREATE: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];

/// Status codes accepted from delete requests.
const EXPECT_DELETE: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// Status codes accepted from read and update requests.
const EXPECT_OK: &[StatusCode] = &[StatusCode::OK];

/// Superset API client for the HTTP(S) protocol.
pub struct HttpClient {
    /// Base URL of the API server to send requests to.
    base: String,

    /// Low-level [`Client`](reqwest::Client) to perform HTTP requests with.
    client: ReqwestClient,

    /// Credentials to authenticate requests with.
    session: Session,
}

impl HttpClient {
    /// Initialise a client with [`ClientOptions`].
    pub fn with<O>(options: O) -> Result<HttpClient>
    where
        O: Into<ClientOptions>,
    {
        let options = options.into();
        let client = ReqwestClient::builder()
            .connect_timeout(options.timeout_connect)
            .cookie_store(true)
            .timeout(options.timeout)
            .user_agent(CLIENT_USER_AGENT);
        let session = Session::new(options.address.clone(), options.username, options.password);
        let client = HttpClient {
            base: options.address,
            client: client.build()?,
            session,
        };
        Ok(client)
    }

    /// Access the authentication state of the client.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl HttpClient {
    /// Send a request and decode the response, invalidating the session on rejection.
    async fn execute<T>(
        &self,
        operation: &'static str,
        expected: &[StatusCode],
        request: RequestBuilder,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;
        let response = crate::error::inspect(operation, expected, response).await;
        if let Err(error) = &response {
            if superset_client::error::is_auth_rejected(error) {
                self.session.invalidate();
            }
        }
        response
    }

    /// Send a state-mutating request after fetching a fresh CSRF token for it.
    async fn mutate<T>(
        &self,
        operation: &'static str,
        expected: &[StatusCode],
        request: RequestBuilder,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let tokens = self.session.csrf_token(&self.client).await?;
        let request = tokens.apply(request, &self.base);
        self.execute(operation, expected, request).await
    }

    /// Send a read-only request with the session bearer token attached.
    async fn read<T>(&self, operation: &'static str, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let bearer = self.session.bearer(&self.client).await?;
        let request = request.bearer_auth(bearer);
        let response = self
            .execute::<Envelope<T>>(operation, EXPECT_OK, request)
            .await?
            .ok_or(EmptyResponse)?;
        Ok(response.result)
    }
}

#[async_trait::async_trait]
impl ISuperset for HttpClient {
    async fn create_user(&self, user: &UserSpec) -> Result<i64> {
        self::users::create(self, user).await
    }

    async fn get_user(&self, id: i64) -> Result<User> {
        self::users::get(self, id).await
    }

    async fn update_user(&self, id: i64, user: &UserSpec) -> Result<()> {
        self::users::update(self, id, user).await
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self::users::delete(self, id).await
    }

    async fn fetch_users(&self) -> Result<Vec<User>> {
        self::users::list(self).await
    }

    async fn create_row_level_security(&self, rule: &RowLevelSecuritySpec) -> Result<i64> {
        self::rls::create(self, rule).await
    }

    async fn get_row_level_security(&self, id: i64) -> Result<RowLevelSecurity> {
        self::rls::get(self, id).await
    }

    async fn update_row_level_security(&self, id: i64, rule: &RowLevelSecuritySpec) -> Result<()> {
        self::rls::update(self, id, rule).await
    }

    async fn delete_row_level_security(&self, id: i64) -> Result<()> {
        self::rls::delete(self, id).await
    }

    async fn get_role_id_by_name(&self, name: &str) -> Result<i64> {
        self::roles::id_by_name(self, name).await
    }
}

/// Envelope wrapping records returned by the Superset API.
#[derive(Deserialize)]
struct Envelope<T> {
    result: T,
}

/// Response to create requests: the new ID at the top level or in the result.
#[derive(Deserialize)]
struct CreatedResponse {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    result: Option<CreatedResult>,
}

#[derive(Deserialize)]
struct CreatedResult {
    #[serde(default)]
    id: Option<i64>,
}

impl CreatedResponse {
    /// Extract the positive ID of the created entity.
    fn into_id(self, operation: &'static str) -> Result<i64> {
        let id = self.id.or_else(|| self.result.and_then(|result| result.id));
        match id {
            Some(id) if id > 0 => Ok(id),
            Some(id) => anyhow::bail!(InvalidResponse {
                response: format!("{} returned a non-positive ID {}", operation, id),
            }),
            None => anyhow::bail!(InvalidResponse {
                response: format!("{} returned no ID", operation),
            }),
        }
    }
}
