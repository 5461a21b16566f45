/*
[INPUT]:  Merchant email/password, profile changes, API key names and ids
[OUTPUT]: Session tokens, merchant profile, API key records
[POS]:    HTTP layer - auth and key management endpoints (session mode)
[UPDATE]: When auth endpoints or key lifecycle change
*/

use reqwest::Method;
use serde_json::Value;
use tracing::info;

use crate::auth::Credential;
use crate::http::client::ApiRequest;
use crate::http::{DigipayClient, DigipayError, Result};
use crate::types::{
    ApiKey, ApiResponse, GenerateKeyRequest, KeyEnvironment, LoginRequest, Profile, ProfileUpdate,
    RegisterRequest, Session,
};

impl DigipayClient {
    /// Log in and switch this client to session mode.
    ///
    /// POST /auth/login
    ///
    /// When the response carries `data.token` (and does not report
    /// `success: false`) the token becomes the bearer credential for every
    /// later call through this client and its clones. The full response is
    /// returned either way.
    pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse<Session>> {
        let body = LoginRequest { email, password };
        let request = ApiRequest::post(["auth", "login"]).json(&body)?.public();
        let response: ApiResponse<Session> = self.send_json(request).await?;

        let token = response
            .data()
            .and_then(|session| session.token.as_deref())
            .map(str::trim)
            .filter(|token| !token.is_empty());

        match token {
            Some(token) if response.is_success() => {
                self.session().install(Credential::bearer(token));
                info!(
                    expires_at = ?self.session().token_expires_at(),
                    "session token installed"
                );
            }
            _ => info!("login response carried no token; credential unchanged"),
        }

        Ok(response)
    }

    /// Create a merchant account. Does not install the returned token.
    ///
    /// POST /auth/register
    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse<Session>> {
        let request = ApiRequest::post(["auth", "register"]).json(request)?.public();
        self.send_json(request).await
    }

    /// GET /auth/profile
    pub async fn profile(&self) -> Result<ApiResponse<Profile>> {
        self.send_json(ApiRequest::get(["auth", "profile"])).await
    }

    /// Update business details; unset fields are left untouched by the service
    ///
    /// PUT /auth/profile
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ApiResponse<Profile>> {
        if update.is_empty() {
            return Err(DigipayError::Config("profile update has no fields set".to_string()));
        }
        let request = ApiRequest::new(Method::PUT, ["auth", "profile"]).json(update)?;
        self.send_json(request).await
    }

    /// Create an API key. The secret is only ever returned by this call.
    ///
    /// POST /keys/generate
    pub async fn generate_api_key(
        &self,
        name: &str,
        environment: KeyEnvironment,
    ) -> Result<ApiResponse<ApiKey>> {
        let body = GenerateKeyRequest {
            name: name.to_string(),
            environment,
        };
        let request = ApiRequest::post(["keys", "generate"]).json(&body)?;
        self.send_json(request).await
    }

    /// GET /keys
    pub async fn list_api_keys(&self) -> Result<ApiResponse<Vec<ApiKey>>> {
        self.send_json(ApiRequest::get(["keys"])).await
    }

    /// DELETE /keys/{id}
    pub async fn revoke_api_key(&self, key_id: &str) -> Result<ApiResponse<Value>> {
        let request = ApiRequest::new(Method::DELETE, ["keys", key_id]);
        self.send_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::CredentialMode;
    use crate::http::{ClientConfig, DigipayClient};
    use crate::types::{FeePayer, KeyEnvironment, ProfileUpdate, RegisterRequest};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(&server.uri())
            .expect("client config")
    }

    #[tokio::test]
    async fn test_login_without_token_keeps_credential() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "data": {"token": "ignored"},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DigipayClient::with_api_key(config_for(&server), "dpk_test").unwrap();
        let response = client.login("shop@example.com", "hunter2").await.unwrap();

        assert!(!response.is_success());
        assert_eq!(client.credential_mode(), Some(CredentialMode::ApiKey));
    }

    #[tokio::test]
    async fn test_login_failure_is_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/api/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "success": false,
                "message": "Invalid credentials",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DigipayClient::new(config_for(&server)).unwrap();
        let err = client.login("shop@example.com", "wrong").await.unwrap_err();

        assert!(err.is_auth_error());
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.api_message(), Some("Invalid credentials"));
        assert!(client.credential_mode().is_none());
    }

    #[tokio::test]
    async fn test_register_is_public_and_does_not_install_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/api/auth/register"))
            .and(body_json(json!({
                "email": "shop@example.com",
                "password": "hunter2",
                "businessName": "Shop SARL",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": {"token": "fresh", "user": {"_id": "u1", "email": "shop@example.com"}},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DigipayClient::new(config_for(&server)).unwrap();
        let response = client
            .register(&RegisterRequest::new("shop@example.com", "hunter2", "Shop SARL"))
            .await
            .unwrap();

        assert_eq!(response.data().and_then(|s| s.token.as_deref()), Some("fresh"));
        assert!(client.credential_mode().is_none());

        let received = server.received_requests().await.unwrap();
        assert!(received[0].headers.get("x-api-key").is_none());
        assert!(received[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_update_profile() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/v1/api/auth/profile"))
            .and(header("authorization", "Bearer abc"))
            .and(body_json(json!({"businessName": "Shop SA", "feePayer": "client"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Profile updated successfully",
                "data": {"merchant": {"businessName": "Shop SA", "feePayer": "client"}},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DigipayClient::with_bearer_token(config_for(&server), "abc").unwrap();
        let update = ProfileUpdate {
            business_name: Some("Shop SA".to_string()),
            fee_payer: Some(FeePayer::Client),
            ..ProfileUpdate::default()
        };
        let profile = client.update_profile(&update).await.unwrap();

        assert_eq!(profile.message.as_deref(), Some("Profile updated successfully"));
        let merchant = profile.into_data().unwrap().merchant.unwrap();
        assert_eq!(merchant.fee_payer, Some(FeePayer::Client));
    }

    #[tokio::test]
    async fn test_empty_profile_update_is_rejected_locally() {
        let client = DigipayClient::with_bearer_token(ClientConfig::default(), "abc").unwrap();
        let err = client.update_profile(&ProfileUpdate::default()).await.unwrap_err();
        assert!(err.is_config_error());
    }

    #[tokio::test]
    async fn test_key_lifecycle() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/api/keys/generate"))
            .and(header("authorization", "Bearer abc"))
            .and(body_json(json!({"name": "Production Key", "environment": "live"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": {"_id": "key-1", "key": "dpk_secret", "name": "Production Key", "environment": "live"},
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/api/keys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{"_id": "key-1", "name": "Production Key", "environment": "live", "isActive": true}],
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/v1/api/keys/key-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "API key revoked",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DigipayClient::with_bearer_token(config_for(&server), "abc").unwrap();

        let generated = client
            .generate_api_key("Production Key", KeyEnvironment::Live)
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(generated.key.as_deref(), Some("dpk_secret"));

        let keys = client.list_api_keys().await.unwrap().into_data().unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].is_active, Some(true));
        assert!(keys[0].key.is_none());

        let revoked = client.revoke_api_key("key-1").await.unwrap();
        assert_eq!(revoked.message.as_deref(), Some("API key revoked"));
    }
}
