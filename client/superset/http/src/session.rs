//! Session management: bearer credentials and CSRF tokens for Superset API requests.
use std::sync::Mutex;
use std::sync::MutexGuard;

use anyhow::Context;
use anyhow::Result;
use reqwest::header::REFERER;
use reqwest::Client as ReqwestClient;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use superset_client::error::AuthError;
use superset_client::error::EmptyResponse;

/// Header carrying the CSRF token on mutating requests.
const CSRF_HEADER: &str = "X-CSRFToken";

const PATH_CSRF_TOKEN: &str = "api/v1/security/csrf_token/";
const PATH_LOGIN: &str = "api/v1/security/login";

/// Bearer credential obtained by logging in.
#[derive(Clone, Debug)]
pub struct Credential {
    /// Time the credential was obtained.
    pub acquired: OffsetDateTime,

    /// Access token to attach to all requests.
    pub bearer: String,
}

/// Tokens to attach to a single state-mutating request.
#[derive(Clone, Debug)]
pub struct MutationTokens {
    pub bearer: String,
    pub csrf: String,
}

/// Authentication state for a Superset API client.
///
/// The bearer credential is kept until the server rejects it.
/// CSRF tokens are requested fresh for each mutating request and never stored.
pub struct Session {
    base: String,
    credential: Mutex<Option<Credential>>,
    password: String,
    username: String,
}

impl Session {
    /// Session for the Superset server at `base`, which must end with a slash.
    pub fn new(base: String, username: String, password: String) -> Session {
        Session {
            base,
            credential: Mutex::new(None),
            password,
            username,
        }
    }

    /// Return the bearer token currently held, logging in if needed.
    pub async fn bearer(&self, client: &ReqwestClient) -> Result<String> {
        if let Some(credential) = self.credential() {
            return Ok(credential.bearer);
        }
        let credential = self.login(client).await?;
        Ok(credential.bearer)
    }

    /// The credential currently held by the session, if any.
    pub fn credential(&self) -> Option<Credential> {
        self.lock().clone()
    }

    /// Request a CSRF token for the next mutating request.
    pub async fn csrf_token(&self, client: &ReqwestClient) -> Result<MutationTokens> {
        let bearer = self.bearer(client).await.context(AuthError::Csrf)?;
        let response = client
            .get(format!("{}{}", self.base, PATH_CSRF_TOKEN))
            .bearer_auth(&bearer)
            .send()
            .await
            .context(AuthError::Csrf)?;
        let response =
            crate::error::inspect_success::<CsrfResponse>("fetch CSRF token", response).await;
        if let Err(error) = &response {
            if superset_client::error::is_auth_rejected(error) {
                self.invalidate();
            }
        }
        let csrf = response
            .context(AuthError::Csrf)?
            .map(|response| response.result)
            .filter(|token| !token.is_empty())
            .ok_or(EmptyResponse)
            .context(AuthError::Csrf)?;
        Ok(MutationTokens { bearer, csrf })
    }

    /// Discard the credential currently held so the next request logs in again.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// Log in with the session's username and password and store the new credential.
    ///
    /// Any `2xx` response carrying a non-empty access token is a successful login.
    pub async fn login(&self, client: &ReqwestClient) -> Result<Credential> {
        let request = LoginRequest {
            password: &self.password,
            provider: "db",
            refresh: true,
            username: &self.username,
        };
        let response = client
            .post(format!("{}{}", self.base, PATH_LOGIN))
            .json(&request)
            .send()
            .await
            .with_context(|| AuthError::Login(self.username.clone()))?;
        let bearer = crate::error::inspect_success::<LoginResponse>("login", response)
            .await
            .with_context(|| AuthError::Login(self.username.clone()))?
            .map(|response| response.access_token)
            .filter(|token| !token.is_empty())
            .ok_or(EmptyResponse)
            .with_context(|| AuthError::Login(self.username.clone()))?;
        let credential = Credential {
            acquired: OffsetDateTime::now_utc(),
            bearer,
        };
        *self.lock() = Some(credential.clone());
        Ok(credential)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Credential>> {
        self.credential.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MutationTokens {
    /// Attach the tokens to a state-mutating request sent to the server at `base`.
    pub fn apply(&self, request: RequestBuilder, base: &str) -> RequestBuilder {
        request
            .bearer_auth(&self.bearer)
            .header(CSRF_HEADER, &self.csrf)
            .header(REFERER, base)
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
    provider: &'static str,
    refresh: bool,
    username: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct CsrfResponse {
    result: String,
}
