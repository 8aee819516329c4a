use serde_json::json;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

use superset_client::error::AuthError;
use superset_client::error::EmptyResponse;
use superset_client::error::HttpStatusError;
use superset_client::error::InvalidResponse;
use superset_client::ISuperset;

use super::client;
use super::mount_csrf;
use super::mount_login;
use super::BEARER;
use super::CSRF;

fn user_payload() -> serde_json::Value {
    json!({
        "result": {
            "id": 100,
            "username": "test.user",
            "first_name": "Test",
            "last_name": "User",
            "email": "test.user@example.com",
            "active": true,
            "roles": [{"id": 4, "name": "Gamma"}],
        }
    })
}

#[tokio::test]
async fn login_stores_credential() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/security/login"))
        .and(body_partial_json(json!({
            "username": "admin",
            "password": "admin",
            "provider": "db",
            "refresh": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.session().credential().is_none());
    let credential = client.session().login(&client.client).await.unwrap();
    assert_eq!(credential.bearer, "test-token");
    let held = client.session().credential().unwrap();
    assert_eq!(held.bearer, "test-token");
    assert_eq!(held.acquired, credential.acquired);
}

#[tokio::test]
async fn login_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/security/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Not authorized",
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let error = client.get_user(100).await.unwrap_err();
    let auth = error.downcast_ref::<AuthError>().unwrap();
    assert!(matches!(auth, AuthError::Login(username) if username == "admin"));
    let status = error.downcast_ref::<HttpStatusError>().unwrap();
    assert_eq!(status.status, 401);
    assert!(client.session().credential().is_none());
}

#[tokio::test]
async fn login_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/security/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"refresh_token": "x"})))
        .mount(&server)
        .await;

    let client = client(&server);
    let error = client.session().login(&client.client).await.unwrap_err();
    assert!(error.is::<AuthError>());
    assert!(error.is::<InvalidResponse>());
}

#[tokio::test]
async fn login_with_empty_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/security/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": ""})))
        .mount(&server)
        .await;

    let client = client(&server);
    let error = client.session().login(&client.client).await.unwrap_err();
    assert!(error.is::<AuthError>());
    assert!(error.is::<EmptyResponse>());
}

#[tokio::test]
async fn bearer_reused_across_requests() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/security/users/100"))
        .and(header("Authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_payload()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    client.get_user(100).await.unwrap();
    client.get_user(100).await.unwrap();
}

#[tokio::test]
async fn rejected_credential_is_discarded() {
    let server = MockServer::start().await;
    mount_login(&server, 2).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/security/users/100"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "msg": "Token has expired",
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/security/users/100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_payload()))
        .expect(1)
        .mount(&server)
        .await;

    // The failed call is not retried, the next call logs in again.
    let client = client(&server);
    let error = client.get_user(100).await.unwrap_err();
    assert!(superset_client::error::is_auth_rejected(&error));
    assert!(client.session().credential().is_none());

    let user = client.get_user(100).await.unwrap();
    assert_eq!(user.username, "test.user");
    assert!(client.session().credential().is_some());
}

#[tokio::test]
async fn mutation_carries_csrf_token() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_csrf(&server, 2).await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/security/users/100"))
        .and(header("Authorization", BEARER))
        .and(header("X-CSRFToken", CSRF))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    // Each mutation fetches its own token.
    let client = client(&server);
    client.delete_user(100).await.unwrap();
    client.delete_user(100).await.unwrap();
}

#[tokio::test]
async fn csrf_failure_aborts_mutation() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/security/csrf_token/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Fatal error",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/rowlevelsecurity/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let rule = superset_client::models::RowLevelSecuritySpec {
        name: "test_rls".into(),
        ..Default::default()
    };
    let error = client
        .update_row_level_security(123, &rule)
        .await
        .unwrap_err();
    let auth = error.downcast_ref::<AuthError>().unwrap();
    assert!(matches!(auth, AuthError::Csrf));
}

#[tokio::test]
async fn csrf_without_token_aborts_mutation() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/security/csrf_token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": ""})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let error = client.delete_row_level_security(123).await.unwrap_err();
    assert!(error.is::<EmptyResponse>());
}

#[tokio::test]
async fn login_accepts_any_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/security/login"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "access_token": "test-token",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/security/csrf_token/"))
        .and(header("Authorization", BEARER))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "result": CSRF })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/rowlevelsecurity/123"))
        .and(header("X-CSRFToken", CSRF))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.delete_row_level_security(123).await.unwrap();
    let held = client.session().credential().unwrap();
    assert_eq!(held.bearer, "test-token");
}

#[tokio::test]
async fn csrf_rejection_discards_credential() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/security/csrf_token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "msg": "Token has expired",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let error = client.delete_user(100).await.unwrap_err();
    let auth = error.downcast_ref::<AuthError>().unwrap();
    assert!(matches!(auth, AuthError::Csrf));
    let status = error.downcast_ref::<HttpStatusError>().unwrap();
    assert_eq!(status.status, 401);
    assert!(client.session().credential().is_none());
}

#[tokio::test]
async fn mutation_rejection_discards_credential() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_csrf(&server, 1).await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/security/users/100"))
        .and(header("X-CSRFToken", CSRF))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "msg": "Token has expired",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let error = client.delete_user(100).await.unwrap_err();
    assert!(superset_client::error::is_auth_rejected(&error));
    assert!(client.session().credential().is_none());
}
