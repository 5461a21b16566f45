/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Response envelope and paginated list payloads
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::models::{Settlement, Transaction};
use crate::http::{DigipayError, Result};

/// Envelope every endpoint answers with: `{success, data, message}`.
///
/// Fields outside the envelope are kept in `extra`. The body exactly as the
/// service sent it, explicit nulls included, is kept alongside the typed view
/// and is what the envelope serializes back to.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: Option<bool>,
    pub data: Option<T>,
    pub message: Option<String>,
    pub extra: Map<String, Value>,
    raw: Value,
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default = "Option::default")]
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let envelope: Envelope<T> = Envelope::deserialize(&raw).map_err(D::Error::custom)?;
        Ok(Self {
            success: envelope.success,
            data: envelope.data,
            message: envelope.message,
            extra: envelope.extra,
            raw,
        })
    }
}

impl<T> Serialize for ApiResponse<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}

impl<T> ApiResponse<T> {
    /// `false` only when the service explicitly reported `success: false`
    pub fn is_success(&self) -> bool {
        self.success != Some(false)
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Body as received
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// Take the payload, failing if the envelope carried none
    pub fn into_data(self) -> Result<T> {
        self.data.ok_or_else(|| {
            DigipayError::InvalidResponse(
                self.message
                    .unwrap_or_else(|| "response envelope has no data".to_string()),
            )
        })
    }
}

/// Page counters; `null` (e.g. `pages` for a zero limit) reads as 0
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub page: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub limit: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub pages: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// `data` of `GET /payments/transactions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    #[serde(default)]
    pub docs: Vec<Transaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_docs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `data` of `GET /settlements`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettlementPage {
    #[serde(default)]
    pub settlements: Vec<Settlement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
