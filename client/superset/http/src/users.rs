//! User operations of the Superset security API.
use anyhow::Context;
use anyhow::Result;

use superset_client::error::EmptyResponse;
use superset_client::error::ResourceIdentifier;
use superset_client::models::User;
use superset_client::models::UserSpec;

use super::CreatedResponse;
use super::HttpClient;

const PATH_USERS: &str = "api/v1/security/users/";

/// Query listing users in a single page.
const QUERY_LIST: &str = "q=(page_size:5000)";

pub async fn create(client: &HttpClient, user: &UserSpec) -> Result<i64> {
    let request = client
        .client
        .post(format!("{}{}", client.base, PATH_USERS))
        .json(user);
    let response = client
        .mutate::<CreatedResponse>("create user", super::EXPECT_CREATE, request)
        .await
        .with_context(|| ResourceIdentifier::reference("user", &user.username))?
        .ok_or(EmptyResponse)?;
    response.into_id("create user")
}

pub async fn get(client: &HttpClient, id: i64) -> Result<User> {
    let request = client
        .client
        .get(format!("{}{}{}", client.base, PATH_USERS, id));
    let user = client
        .read::<User>("get user", request)
        .await
        .with_context(|| ResourceIdentifier::reference("user", id))?;
    Ok(user)
}

/// Update a user: an empty password is omitted from the request body.
pub async fn update(client: &HttpClient, id: i64, user: &UserSpec) -> Result<()> {
    let request = client
        .client
        .put(format!("{}{}{}", client.base, PATH_USERS, id))
        .json(user);
    client
        .mutate::<serde_json::Value>("update user", super::EXPECT_OK, request)
        .await
        .with_context(|| ResourceIdentifier::reference("user", id))?;
    Ok(())
}

pub async fn delete(client: &HttpClient, id: i64) -> Result<()> {
    let request = client
        .client
        .delete(format!("{}{}{}", client.base, PATH_USERS, id));
    client
        .mutate::<serde_json::Value>("delete user", super::EXPECT_DELETE, request)
        .await
        .with_context(|| ResourceIdentifier::reference("user", id))?;
    Ok(())
}

pub async fn list(client: &HttpClient) -> Result<Vec<User>> {
    let request = client
        .client
        .get(format!("{}{}?{}", client.base, PATH_USERS, QUERY_LIST));
    client.read::<Vec<User>>("list users", request).await
}
