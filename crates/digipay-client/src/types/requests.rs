/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{FeePayer, KeyEnvironment, SettlementStatus, TransactionStatus};

/// Currency used when a payment does not name one
pub const DEFAULT_CURRENCY: &str = "XAF";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

/// Customer paying for a payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Customer {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Body of `POST /payments/initiate`.
///
/// `customerEmail`, `metadata` and `webhookUrl` are always sent, as `null`
/// when unset; `description` is only sent when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Amount in the currency's minor unit (XAF has none)
    pub amount: u64,
    pub currency: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub metadata: Option<Value>,
    pub webhook_url: Option<String>,
}

impl PaymentRequest {
    pub fn new(amount: u64, customer_phone: impl Into<String>) -> Self {
        Self {
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            customer_phone: customer_phone.into(),
            customer_email: None,
            description: None,
            metadata: None,
            webhook_url: None,
        }
    }

    pub fn for_customer(amount: u64, customer: Customer) -> Self {
        Self {
            customer_email: customer.email,
            ..Self::new(amount, customer.phone)
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }
}

/// Body of `POST /payments/initiate-dashboard`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPaymentRequest {
    pub amount: u64,
    pub customer_phone: String,
}

/// Query of `GET /payments/transactions`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<TransactionStatus>,
    pub search: Option<String>,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            status: None,
            search: None,
        }
    }
}

impl TransactionQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Query of `GET /settlements`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<SettlementStatus>,
}

impl Default for SettlementQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            status: None,
        }
    }
}

impl SettlementQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn status(mut self, status: SettlementStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Body of `POST /settlements/request`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRequest {
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_phone: Option<String>,
}

#[derive(Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/register`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        business_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            business_name: business_name.into(),
            business_type: None,
            country: None,
            phone: None,
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("business_name", &self.business_name)
            .field("business_type", &self.business_type)
            .field("country", &self.country)
            .field("phone", &self.phone)
            .finish()
    }
}

/// Body of `PUT /auth/profile`; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_payer: Option<FeePayer>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body of `POST /keys/generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateKeyRequest {
    pub name: String,
    pub environment: KeyEnvironment,
}
