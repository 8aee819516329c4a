use serde_json::json;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

use crate::ClientOptions;
use crate::HttpClient;

mod session;

const BEARER: &str = "Bearer test-token";
const CSRF: &str = "test-csrf-token";

/// Client for the mock server, logging in as admin.
fn client(server: &MockServer) -> HttpClient {
    let options = ClientOptions::url(server.uri()).credentials("admin", "admin");
    HttpClient::with(options).unwrap()
}

/// Accept logins, expecting exactly `times` of them.
async fn mount_login(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/api/v1/security/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "refresh_token": "test-refresh",
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// Issue CSRF tokens, expecting exactly `times` requests for them.
async fn mount_csrf(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/api/v1/security/csrf_token/"))
        .and(wiremock::matchers::header("Authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": CSRF })))
        .expect(times)
        .mount(server)
        .await;
}

/// Decode the JSON body of the only request received for the given method and path.
async fn received_body(server: &MockServer, verb: &str, url_path: &str) -> serde_json::Value {
    let requests = server.received_requests().await.unwrap();
    let matching: Vec<_> = requests
        .iter()
        .filter(|request| request.method.as_str() == verb && request.url.path() == url_path)
        .collect();
    assert_eq!(matching.len(), 1, "expected one {} {} request", verb, url_path);
    matching[0].body_json().unwrap()
}
