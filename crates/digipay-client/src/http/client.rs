/*
[INPUT]:  HTTP configuration (base URL, timeouts), credential slot, request descriptors
[OUTPUT]: Configured reqwest client and the authenticated JSON dispatcher
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing dispatch behavior
*/

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::auth::{Credential, CredentialMode, SessionStore};
use crate::http::{DigipayError, Result};

/// Base URL used when neither an explicit value nor `DIGIPAY_API_URL` is set
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Versioned prefix every endpoint lives under
pub const API_PREFIX: &str = "/v1/api";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "DIGIPAY_API_URL";

/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_ENV: &str = "DIGIPAY_TIMEOUT_SECS";

const JSON: &str = "application/json";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("digipay-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `DIGIPAY_API_URL` and `DIGIPAY_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            config.base_url = parse_base_url(&base_url)?;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|value| !value.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                DigipayError::Config(format!("{TIMEOUT_ENV} must be a whole number of seconds, got {raw:?}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Replace the base URL; a trailing `/v1/api` is accepted and stripped
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Parse a base URL, dropping trailing slashes and an already-present API prefix
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(API_PREFIX).unwrap_or(trimmed);
    let url = Url::parse(trimmed)?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(DigipayError::Config(format!("base URL must be an http(s) URL, got {raw:?}")));
    }
    Ok(url)
}

/// Transient description of one API call
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
    body: Option<Vec<u8>>,
    authenticated: bool,
}

impl ApiRequest {
    pub(crate) fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
            authenticated: true,
        }
    }

    pub(crate) fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub(crate) fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub(crate) fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub(crate) fn query_opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub(crate) fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body).map_err(DigipayError::Encode)?);
        Ok(self)
    }

    /// Send without a credential (login, register)
    pub(crate) fn public(mut self) -> Self {
        self.authenticated = false;
        self
    }

    fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// General-purpose DigiPay client.
///
/// Works in API-key mode or session mode. A missing credential is not an
/// error at construction; the first authenticated call fails with
/// [`DigipayError::Authentication`] instead, without touching the network.
/// Clones share the credential slot.
#[derive(Debug, Clone)]
pub struct DigipayClient {
    http_client: Client,
    base_url: Url,
    session: SessionStore,
}

impl DigipayClient {
    /// Client built from the environment: `DIGIPAY_API_URL`, `DIGIPAY_TIMEOUT_SECS`, `DIGIPAY_API_KEY`
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?, Credential::from_env())
    }

    /// Client without a credential, e.g. before `login`
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_config(config, None)
    }

    /// Client in API-key mode
    pub fn with_api_key(config: ClientConfig, api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(config, Some(Credential::api_key(api_key)))
    }

    /// Client resuming an existing session token
    pub fn with_bearer_token(config: ClientConfig, token: impl Into<String>) -> Result<Self> {
        Self::with_config(config, Some(Credential::bearer(token)))
    }

    /// Create a client with custom configuration and optional credential
    pub fn with_config(config: ClientConfig, credential: Option<Credential>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DigipayError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
            session: SessionStore::new(credential.filter(|credential| !credential.is_blank())),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Shared credential slot
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn credential_mode(&self) -> Option<CredentialMode> {
        self.session.mode()
    }

    /// Switch credential; replaces whatever mode was active
    pub fn set_credential(&self, credential: Credential) {
        info!(mode = ?credential.mode(), "credential installed");
        self.session.install(credential);
    }

    /// Forget the active credential
    pub fn clear_session(&self) {
        info!("credential cleared");
        self.session.clear();
    }

    /// Full URL for an endpoint: base + `/v1/api` + percent-encoded segments
    pub(crate) fn endpoint_url(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| DigipayError::Config("base URL cannot carry a path".to_string()))?;
            path.pop_if_empty();
            path.extend(API_PREFIX.split('/').filter(|segment| !segment.is_empty()));
            path.extend(request.segments.iter());
        }

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Dispatch one request and decode the 2xx body.
    ///
    /// Non-2xx becomes [`DigipayError::Api`]; transport failures surface as
    /// [`DigipayError::Http`]; an undecodable 2xx body as [`DigipayError::Decode`].
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let url = self.endpoint_url(&request)?;
        let path = request.path();

        let mut builder = self
            .http_client
            .request(request.method.clone(), url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);

        if request.authenticated {
            let credential = self.session.current().ok_or_else(|| DigipayError::Authentication {
                message: format!(
                    "no API key or session token configured for {} {path}; set {} or log in",
                    request.method,
                    crate::auth::API_KEY_ENV
                ),
            })?;
            let (name, value) = credential.header()?;
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let started = Instant::now();
        let response = builder.send().await.inspect_err(|err| {
            warn!(method = %request.method, path = %path, error = %err, "request failed");
        })?;
        let status = response.status();
        let raw = response.bytes().await?;

        debug!(
            method = %request.method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );

        if !status.is_success() {
            let err = DigipayError::from_response(status, &raw);
            warn!(
                method = %request.method,
                path = %path,
                status = status.as_u16(),
                message = err.api_message().unwrap_or_default(),
                "API returned error status"
            );
            return Err(err);
        }

        serde_json::from_slice(&raw).map_err(|source| DigipayError::Decode {
            status: status.as_u16(),
            source,
        })
    }
}
