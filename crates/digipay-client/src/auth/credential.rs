/*
[INPUT]:  API key or session token strings, environment lookups
[OUTPUT]: Credential value and the single auth header it maps to
[POS]:    Auth layer - credential modes for the request dispatcher
[UPDATE]: When adding credential modes or changing header names
*/

use std::fmt;

use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};

use crate::http::{DigipayError, Result};

/// Environment variable holding the merchant API key
pub const API_KEY_ENV: &str = "DIGIPAY_API_KEY";

/// Header carrying the API key in API-key mode
pub const API_KEY_HEADER: &str = "x-api-key";

/// Which header a credential is sent in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMode {
    ApiKey,
    BearerToken,
}

/// Active credential of a client.
///
/// Exactly one is attached to each authenticated request: `x-api-key` for
/// [`Credential::ApiKey`], `Authorization: Bearer` for
/// [`Credential::BearerToken`].
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    ApiKey(String),
    BearerToken(String),
}

impl Credential {
    /// Long-lived merchant API key
    pub fn api_key(key: impl Into<String>) -> Self {
        Credential::ApiKey(key.into())
    }

    /// Session token obtained from login
    pub fn bearer(token: impl Into<String>) -> Self {
        Credential::BearerToken(token.into())
    }

    /// Read `DIGIPAY_API_KEY` from the process environment
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the API key through an arbitrary lookup; blank values count as absent
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .map(Credential::ApiKey)
    }

    pub fn mode(&self) -> CredentialMode {
        match self {
            Credential::ApiKey(_) => CredentialMode::ApiKey,
            Credential::BearerToken(_) => CredentialMode::BearerToken,
        }
    }

    /// Raw secret, for callers that need to persist it themselves
    pub fn secret(&self) -> &str {
        match self {
            Credential::ApiKey(secret) | Credential::BearerToken(secret) => secret,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.secret().trim().is_empty()
    }

    /// Header name and value for this credential
    pub(crate) fn header(&self) -> Result<(HeaderName, HeaderValue)> {
        let (name, raw) = match self {
            Credential::ApiKey(key) => (HeaderName::from_static(API_KEY_HEADER), key.clone()),
            Credential::BearerToken(token) => (AUTHORIZATION, format!("Bearer {token}")),
        };

        let mut value = HeaderValue::from_str(&raw).map_err(|_| {
            DigipayError::Config("credential contains characters not allowed in a header".to_string())
        })?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Credential::ApiKey(_) => "ApiKey",
            Credential::BearerToken(_) => "BearerToken",
        };
        f.debug_tuple(name).field(&"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_api_key_header() {
        let (name, value) = Credential::api_key("dpk_test").header().unwrap();
        assert_eq!(name.as_str(), "x-api-key");
        assert_eq!(value.to_str().unwrap(), "dpk_test");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_bearer_header() {
        let (name, value) = Credential::bearer("abc").header().unwrap();
        assert_eq!(name, AUTHORIZATION);
        assert_eq!(value.to_str().unwrap(), "Bearer abc");
    }

    #[test]
    fn test_invalid_header_value_is_config_error() {
        let err = Credential::api_key("bad\nkey").header().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", Credential::api_key("dpk_secret"));
        assert_eq!(rendered, "ApiKey(\"<redacted>\")");
        assert!(!rendered.contains("dpk_secret"));
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = HashMap::from([(API_KEY_ENV, " dpk_env ")]);
        let credential = Credential::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(credential, Some(Credential::api_key("dpk_env")));

        let blank: HashMap<&str, &str> = HashMap::from([(API_KEY_ENV, "  ")]);
        assert!(Credential::from_lookup(|name| blank.get(name).map(|v| v.to_string())).is_none());
        assert!(Credential::from_lookup(|_| None).is_none());
    }
}
