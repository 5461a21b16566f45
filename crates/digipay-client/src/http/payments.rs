/*
[INPUT]:  Payment requests, transaction identifiers, list filters
[OUTPUT]: Payment initiation results, transactions, analytics
[POS]:    HTTP layer - payment endpoints
[UPDATE]: When adding payment endpoints or changing query parameters
*/

use reqwest::Method;
use serde_json::Value;

use crate::http::client::ApiRequest;
use crate::http::{DigipayClient, Result};
use crate::types::{
    Analytics, ApiResponse, DashboardPaymentRequest, PaymentInitiated, PaymentRequest, Transaction,
    TransactionPage, TransactionQuery,
};

impl DigipayClient {
    /// Initiate a payment (pay-in)
    ///
    /// POST /payments/initiate
    pub async fn initiate_payment(&self, request: &PaymentRequest) -> Result<ApiResponse<PaymentInitiated>> {
        let request = ApiRequest::post(["payments", "initiate"]).json(request)?;
        self.send_json(request).await
    }

    /// Initiate a payment with the dashboard session's own email
    ///
    /// POST /payments/initiate-dashboard
    pub async fn initiate_dashboard_payment(
        &self,
        amount: u64,
        customer_phone: &str,
    ) -> Result<ApiResponse<PaymentInitiated>> {
        let body = DashboardPaymentRequest {
            amount,
            customer_phone: customer_phone.to_string(),
        };
        let request = ApiRequest::post(["payments", "initiate-dashboard"]).json(&body)?;
        self.send_json(request).await
    }

    /// List transactions, newest first
    ///
    /// GET /payments/transactions?page={page}&limit={limit}&status={status}&search={search}
    pub async fn list_transactions(&self, query: &TransactionQuery) -> Result<ApiResponse<TransactionPage>> {
        let request = ApiRequest::get(["payments", "transactions"])
            .query("page", query.page)
            .query("limit", query.limit)
            .query_opt("status", query.status)
            .query_opt("search", query.search.as_deref());
        self.send_json(request).await
    }

    /// GET /payments/transactions/{id}
    pub async fn get_transaction(&self, transaction_id: &str) -> Result<ApiResponse<Transaction>> {
        let request = ApiRequest::get(["payments", "transactions", transaction_id]);
        self.send_json(request).await
    }

    /// Lightweight status check
    ///
    /// GET /payments/verify/{id}
    pub async fn verify_payment(&self, transaction_id: &str) -> Result<ApiResponse<Transaction>> {
        let request = ApiRequest::get(["payments", "verify", transaction_id]);
        self.send_json(request).await
    }

    /// GET /payments/{id}
    pub async fn get_payment(&self, transaction_id: &str) -> Result<ApiResponse<Transaction>> {
        let request = ApiRequest::get(["payments", transaction_id]);
        self.send_json(request).await
    }

    /// Daily volume and status distribution
    ///
    /// GET /payments/analytics
    pub async fn analytics(&self) -> Result<ApiResponse<Analytics>> {
        self.send_json(ApiRequest::get(["payments", "analytics"])).await
    }

    /// Escape hatch for endpoints without a typed wrapper
    pub async fn request_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let segments = path.split('/').filter(|segment| !segment.is_empty());
        let mut request = ApiRequest::new(method, segments);
        if let Some(body) = body {
            request = request.json(body)?;
        }
        self.send_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, DigipayClient};
    use crate::types::{PaymentRequest, TransactionQuery, TransactionStatus};
    use rust_decimal::Decimal;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DigipayClient {
        let config = ClientConfig::default()
            .with_base_url(&server.uri())
            .expect("client config");
        DigipayClient::with_api_key(config, "dpk_test").expect("client init")
    }

    #[tokio::test]
    async fn test_initiate_payment() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/api/payments/initiate"))
            .and(header("x-api-key", "dpk_test"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "amount": 5000,
                "currency": "XAF",
                "customerPhone": "237699000000",
                "customerEmail": null,
                "description": "Order 42",
                "metadata": {"order_id": "ORDER_42"},
                "webhookUrl": null,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": {
                    "transactionId": "TXN_123456",
                    "amount": 5150,
                    "baseAmount": 5000,
                    "commissionAmount": 150,
                    "status": "pending",
                    "freemopayReference": "FMP-1",
                    "message": "USSD push sent",
                },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = PaymentRequest::new(5000, "237699000000")
            .with_description("Order 42")
            .with_metadata(json!({"order_id": "ORDER_42"}));
        let response = client_for(&server)
            .initiate_payment(&request)
            .await
            .expect("initiate_payment failed");

        let data = response.into_data().expect("data");
        assert_eq!(data.transaction_id.as_deref(), Some("TXN_123456"));
        assert_eq!(data.status, Some(TransactionStatus::Pending));
        assert_eq!(data.amount, Some(Decimal::from(5150)));
        assert_eq!(data.commission_amount, Some(Decimal::from(150)));
    }

    #[tokio::test]
    async fn test_list_transactions_with_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/api/payments/transactions"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "5"))
            .and(query_param("status", "success"))
            .and(query_param("search", "2376"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "docs": [{"transactionId": "TXN_1", "status": "success", "totalAmount": 1030}],
                    "totalDocs": 6,
                    "pagination": {"page": 2, "limit": 5, "total": 6, "pages": 2},
                },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = TransactionQuery::default()
            .page(2)
            .limit(5)
            .status(TransactionStatus::Success)
            .search("2376");
        let page = client_for(&server)
            .list_transactions(&query)
            .await
            .expect("list_transactions failed")
            .into_data()
            .expect("data");

        assert_eq!(page.docs.len(), 1);
        assert_eq!(page.docs[0].charged_amount(), Some(Decimal::from(1030)));
        let pagination = page.pagination.expect("pagination");
        assert_eq!(pagination.pages, 2);
        assert!(!pagination.has_next());
    }

    #[tokio::test]
    async fn test_list_transactions_omits_absent_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/api/payments/transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"docs": []},
            })))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .list_transactions(&TransactionQuery::default())
            .await
            .expect("list_transactions failed");

        let received = server.received_requests().await.expect("recorded requests");
        let url = &received[0].url;
        let keys: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(keys, vec!["page", "limit"]);
        assert_eq!(url.query(), Some("page=1&limit=20"));
    }

    #[tokio::test]
    async fn test_transaction_lookups_use_documented_paths() {
        let server = MockServer::start().await;
        let body = json!({"success": true, "data": {"transactionId": "TXN_9", "status": "failed"}});

        for route in [
            "/v1/api/payments/transactions/TXN_9",
            "/v1/api/payments/verify/TXN_9",
            "/v1/api/payments/TXN_9",
        ] {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server);
        let fetched = client.get_transaction("TXN_9").await.expect("get_transaction");
        let verified = client.verify_payment("TXN_9").await.expect("verify_payment");
        let detail = client.get_payment("TXN_9").await.expect("get_payment");

        for response in [fetched, verified, detail] {
            assert_eq!(
                response.data().and_then(|t| t.status),
                Some(TransactionStatus::Failed)
            );
        }
    }

    #[tokio::test]
    async fn test_analytics() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/api/payments/analytics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "dailyVolume": [{"date": "2024-05-01", "volume": 12000, "count": 3}],
                    "statusDistribution": [{"name": "Success", "value": 3, "status": "success"}],
                },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let analytics = client_for(&server)
            .analytics()
            .await
            .expect("analytics failed")
            .into_data()
            .expect("data");

        assert_eq!(analytics.daily_volume[0].volume, Some(Decimal::from(12000)));
        assert_eq!(analytics.status_distribution[0].value, Some(3));
    }

    #[tokio::test]
    async fn test_request_raw() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/api/kyc/status"))
            .and(header("x-api-key", "dpk_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {"status": "approved"}})))
            .expect(1)
            .mount(&server)
            .await;

        let value = client_for(&server)
            .request_raw(reqwest::Method::GET, "/kyc/status", None)
            .await
            .expect("request_raw failed");
        assert_eq!(value["data"]["status"], "approved");
    }
}
