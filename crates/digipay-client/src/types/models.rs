/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{FeePayer, KeyEnvironment, SettlementStatus, TransactionStatus};

/// Result of `POST /payments/initiate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub base_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub commission_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freemopay_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A payment attempt as stored by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub base_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub commission_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub total_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freemopay_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Amount charged, whichever field the endpoint reported it in
    pub fn charged_amount(&self) -> Option<Decimal> {
        self.total_amount.or(self.amount)
    }
}

/// Merchant balance from `GET /settlements/balance`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub balance: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub total_revenue: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub total_commission_paid: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A payout of merchant balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SettlementStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// API key record; `key` is only present in the generate response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<KeyEnvironment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kyc_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_payer: Option<FeePayer>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub balance: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `data` of login and register responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<Merchant>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `data` of profile responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<Merchant>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyVolume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::amount")]
    pub volume: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusShare {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `data` of `GET /payments/analytics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[serde(default)]
    pub daily_volume: Vec<DailyVolume>,
    #[serde(default)]
    pub status_distribution: Vec<StatusShare>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub(crate) mod serde_helpers {
    pub mod amount {
        use rust_decimal::Decimal;
        use rust_decimal::prelude::ToPrimitive;
        use serde::{Deserialize, Deserializer, Serializer};
        use serde_json::Value;
        use std::str::FromStr;

        /// Accepts JSON numbers, numeric strings and null
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Value::deserialize(deserializer)?;
            let raw = match &value {
                Value::Null => return Ok(None),
                Value::String(raw) if raw.trim().is_empty() => return Ok(None),
                Value::String(raw) => raw.trim().to_string(),
                Value::Number(number) => number.to_string(),
                _ => return Err(serde::de::Error::custom("invalid amount value")),
            };

            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .map(Some)
                .map_err(serde::de::Error::custom)
        }

        /// Whole amounts go out as JSON integers, fractional ones as floats
        pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let Some(value) = value else {
                return serializer.serialize_none();
            };

            if let Some(whole) = value.to_i64().filter(|_| value.fract().is_zero()) {
                return serializer.serialize_i64(whole);
            }

            match value.to_f64() {
                Some(float) => serializer.serialize_f64(float),
                None => serializer.serialize_str(&value.to_string()),
            }
        }
    }
}
