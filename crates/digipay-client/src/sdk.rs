/*
[INPUT]:  Required API key, target environment, optional base URL override
[OUTPUT]: Key-required client with `payments()` / `settlements()` namespaces
[POS]:    SDK layer - strict facade over the shared dispatcher
[UPDATE]: When SDK namespaces or environment URLs change
*/

use std::time::Duration;

use serde_json::Value;

use crate::auth::{API_KEY_ENV, Credential};
use crate::http::{BASE_URL_ENV, ClientConfig, DigipayClient, DigipayError, Result};
use crate::types::{ApiResponse, Balance, PaymentInitiated, PaymentRequest, Transaction};

pub const PRODUCTION_BASE_URL: &str = "https://digitalcertify.tech";
pub const SANDBOX_BASE_URL: &str = "https://sandbox.digitalcertify.tech";

/// Hosted DigiPay environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

/// Official SDK client.
///
/// Unlike [`DigipayClient`], an API key is mandatory: construction fails with
/// [`DigipayError::Config`] when none is available, before any request.
#[derive(Debug, Clone)]
pub struct Digipay {
    client: DigipayClient,
    environment: Environment,
}

impl Digipay {
    /// Production client with an explicit key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build_with(|_| None)
    }

    pub fn builder() -> DigipayBuilder {
        DigipayBuilder::default()
    }

    /// Key from `DIGIPAY_API_KEY`; URL from `DIGIPAY_API_URL` when set, else production
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Underlying dispatcher, for endpoints outside the SDK namespaces
    pub fn client(&self) -> &DigipayClient {
        &self.client
    }

    pub fn payments(&self) -> Payments<'_> {
        Payments { client: &self.client }
    }

    pub fn settlements(&self) -> Settlements<'_> {
        Settlements { client: &self.client }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DigipayBuilder {
    api_key: Option<String>,
    environment: Option<Environment>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl DigipayBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Overrides both the environment's URL and `DIGIPAY_API_URL`
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build, falling back to the process environment for the key, and for the
    /// URL when neither a URL nor an environment was chosen
    pub fn build(self) -> Result<Digipay> {
        self.build_with(|name| std::env::var(name).ok())
    }

    /// Build with an injectable environment lookup
    pub fn build_with<F>(self, lookup: F) -> Result<Digipay>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = self
            .api_key
            .map(Credential::api_key)
            .filter(|credential| !credential.is_blank())
            .or_else(|| Credential::from_lookup(&lookup))
            .ok_or_else(|| {
                DigipayError::Config(format!("API key is required; pass one or set {API_KEY_ENV}"))
            })?;

        // explicit URL, then explicit environment, then DIGIPAY_API_URL, then production
        let base_url = self
            .base_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.environment.map(|environment| environment.base_url().to_string()))
            .or_else(|| lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()))
            .unwrap_or_else(|| PRODUCTION_BASE_URL.to_string());

        let mut config = ClientConfig::from_lookup(|name| {
            if name == BASE_URL_ENV { None } else { lookup(name) }
        })?
        .with_base_url(&base_url)?;
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        Ok(Digipay {
            client: DigipayClient::with_config(config, Some(credential))?,
            environment: self.environment.unwrap_or_default(),
        })
    }
}

/// `client.payments()` namespace
#[derive(Debug, Clone, Copy)]
pub struct Payments<'a> {
    client: &'a DigipayClient,
}

impl Payments<'_> {
    /// POST /payments/initiate
    pub async fn create(&self, request: &PaymentRequest) -> Result<ApiResponse<PaymentInitiated>> {
        self.client.initiate_payment(request).await
    }

    /// GET /payments/verify/{id}
    pub async fn verify(&self, transaction_id: &str) -> Result<ApiResponse<Transaction>> {
        self.client.verify_payment(transaction_id).await
    }

    /// GET /payments/{id}
    pub async fn get(&self, transaction_id: &str) -> Result<ApiResponse<Transaction>> {
        self.client.get_payment(transaction_id).await
    }
}

/// `client.settlements()` namespace
#[derive(Debug, Clone, Copy)]
pub struct Settlements<'a> {
    client: &'a DigipayClient,
}

impl Settlements<'_> {
    /// Balance payload, whether or not the service wrapped it in `data`
    pub async fn balance(&self) -> Result<Balance> {
        let response = self.client.balance().await?;
        match response.data {
            Some(balance) => Ok(balance),
            None => serde_json::from_value(Value::Object(response.extra)).map_err(|source| {
                DigipayError::Decode {
                    status: 200,
                    source,
                }
            }),
        }
    }
}
