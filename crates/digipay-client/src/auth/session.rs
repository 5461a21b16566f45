/*
[INPUT]:  Credentials installed at construction or by login
[OUTPUT]: Current credential snapshot and session token expiry
[POS]:    Auth layer - the only state mutated after client construction
[UPDATE]: When changing token storage or expiry handling
*/

use std::sync::{Arc, PoisonError, RwLock};

use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
use chrono::{DateTime, Utc};

use super::credential::{Credential, CredentialMode};

/// Thread-safe holder for the client's active credential.
///
/// Clones share the same slot, so a login through one clone is visible to all.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    credential: Arc<RwLock<Option<Credential>>>,
}

impl SessionStore {
    pub fn new(initial: Option<Credential>) -> Self {
        Self {
            credential: Arc::new(RwLock::new(initial)),
        }
    }

    /// Snapshot of the current credential
    pub fn current(&self) -> Option<Credential> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the active credential
    pub fn install(&self, credential: Credential) {
        let mut guard = self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(credential);
    }

    pub fn clear(&self) {
        let mut guard = self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    pub fn mode(&self) -> Option<CredentialMode> {
        self.current().map(|credential| credential.mode())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// Expiry of the bearer token, read from its `exp` claim.
    ///
    /// `None` for API keys, opaque tokens, or tokens without `exp`.
    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        match self.current()? {
            Credential::BearerToken(token) => token_expiry(&token),
            Credential::ApiKey(_) => None,
        }
    }

    /// Check if the bearer token's own `exp` claim has passed
    pub fn is_expired(&self) -> bool {
        self.token_expires_at()
            .map(|expires_at| Utc::now() >= expires_at)
            .unwrap_or(false)
    }
}

/// Decode the `exp` claim of a JWT without verifying its signature
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload_b64 = token.trim().split('.').nth(1)?;
    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .or_else(|_| URL_SAFE.decode(payload_b64))
        .ok()?;

    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
    let exp = payload.get("exp")?.as_i64()?;
    DateTime::from_timestamp(exp, 0)
}
