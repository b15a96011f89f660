/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for cloudtask-client tests

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use cloudtask_client::{ClientConfig, CloudTaskClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> CloudTaskClient {
    CloudTaskClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Unsigned JWT carrying an `exp` claim
#[allow(dead_code)]
pub fn jwt_expiring_at(exp: i64) -> String {
    let header = serde_json::json!({"alg": "none", "typ": "JWT"});
    let payload = serde_json::json!({"sub": "a@b.c", "exp": exp});
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap()),
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap()),
    )
}

/// Mock opaque token for testing
#[allow(dead_code)]
pub fn mock_token() -> String {
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test.signature".to_string()
}
