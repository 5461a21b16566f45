/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for digipay-client tests

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use digipay_client::{ClientConfig, DigipayClient};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "dpk_test_123";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client config pointed at the mock server
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_base_url(&server.uri())
        .expect("mock server URI is a valid base URL")
}

/// API-key client against the mock server
pub fn api_key_client(server: &MockServer) -> DigipayClient {
    DigipayClient::with_api_key(config_for(server), TEST_API_KEY).expect("client init")
}

/// Client with no credential against the mock server
pub fn anonymous_client(server: &MockServer) -> DigipayClient {
    DigipayClient::new(config_for(server)).expect("client init")
}

/// Unsigned JWT carrying only an `exp` claim
pub fn mock_jwt_token(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(format!(r#"{{"userId":"u1","exp":{exp}}}"#));
    format!("{header}.{claims}.signature")
}
