/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a single payment attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[serde(rename = "pending", alias = "PENDING")]
    Pending,
    #[serde(rename = "success", alias = "SUCCESS")]
    Success,
    #[serde(rename = "failed", alias = "FAILED")]
    Failed,
    #[serde(rename = "refunded", alias = "REFUNDED")]
    Refunded,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Refunded => "refunded",
        }
    }

    pub fn is_final(self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementStatus {
    #[serde(rename = "pending", alias = "PENDING")]
    Pending,
    #[serde(rename = "processing", alias = "PROCESSING")]
    Processing,
    #[serde(rename = "completed", alias = "COMPLETED")]
    Completed,
    #[serde(rename = "failed", alias = "FAILED")]
    Failed,
}

impl SettlementStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SettlementStatus::Pending => "pending",
            SettlementStatus::Processing => "processing",
            SettlementStatus::Completed => "completed",
            SettlementStatus::Failed => "failed",
        }
    }
}

/// Environment an API key is valid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEnvironment {
    #[default]
    Test,
    Live,
}

impl KeyEnvironment {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyEnvironment::Test => "test",
            KeyEnvironment::Live => "live",
        }
    }
}

/// Who carries the commission on a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeePayer {
    Merchant,
    Client,
}

impl FeePayer {
    pub fn as_str(self) -> &'static str {
        match self {
            FeePayer::Merchant => "merchant",
            FeePayer::Client => "client",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl std::str::FromStr for $ty {
                type Err = String;

                fn from_str(raw: &str) -> Result<Self, Self::Err> {
                    serde_json::from_value(serde_json::Value::String(raw.trim().to_ascii_lowercase()))
                        .map_err(|_| format!("unknown {} value: {raw}", stringify!($ty)))
                }
            }
        )+
    };
}

display_as_str!(TransactionStatus, SettlementStatus, KeyEnvironment, FeePayer);
