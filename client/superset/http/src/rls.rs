//! Row level security operations of the Superset API.
use anyhow::Context;
use anyhow::Result;

use superset_client::error::EmptyResponse;
use superset_client::error::ResourceIdentifier;
use superset_client::models::RowLevelSecurity;
use superset_client::models::RowLevelSecuritySpec;

use super::CreatedResponse;
use super::HttpClient;

const PATH_RLS: &str = "api/v1/rowlevelsecurity/";
const RESOURCE: &str = "row level security rule";

pub async fn create(client: &HttpClient, rule: &RowLevelSecuritySpec) -> Result<i64> {
    let request = client
        .client
        .post(format!("{}{}", client.base, PATH_RLS))
        .json(rule);
    let response = client
        .mutate::<CreatedResponse>("create row level security rule", super::EXPECT_CREATE, request)
        .await
        .with_context(|| ResourceIdentifier::reference(RESOURCE, &rule.name))?
        .ok_or(EmptyResponse)?;
    response.into_id("create row level security rule")
}

pub async fn get(client: &HttpClient, id: i64) -> Result<RowLevelSecurity> {
    let request = client.client.get(format!("{}{}{}", client.base, PATH_RLS, id));
    let rule = client
        .read::<RowLevelSecurity>("get row level security rule", request)
        .await
        .with_context(|| ResourceIdentifier::reference(RESOURCE, id))?;
    Ok(rule)
}

pub async fn update(client: &HttpClient, id: i64, rule: &RowLevelSecuritySpec) -> Result<()> {
    let request = client
        .client
        .put(format!("{}{}{}", client.base, PATH_RLS, id))
        .json(rule);
    client
        .mutate::<serde_json::Value>("update row level security rule", super::EXPECT_OK, request)
        .await
        .with_context(|| ResourceIdentifier::reference(RESOURCE, id))?;
    Ok(())
}

pub async fn delete(client: &HttpClient, id: i64) -> Result<()> {
    let request = client
        .client
        .delete(format!("{}{}{}", client.base, PATH_RLS, id));
    client
        .mutate::<serde_json::Value>("delete row level security rule", super::EXPECT_DELETE, request)
        .await
        .with_context(|| ResourceIdentifier::reference(RESOURCE, id))?;
    Ok(())
}
