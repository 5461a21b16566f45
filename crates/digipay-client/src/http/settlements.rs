/*
[INPUT]:  Payout amounts, recipient phones, list filters
[OUTPUT]: Merchant balance and settlement records
[POS]:    HTTP layer - settlement endpoints
[UPDATE]: When adding settlement endpoints or changing query parameters
*/

use crate::http::client::ApiRequest;
use crate::http::{DigipayClient, Result};
use crate::types::{ApiResponse, Balance, Settlement, SettlementPage, SettlementQuery, SettlementRequest};

impl DigipayClient {
    /// Merchant balance, revenue and commission totals
    ///
    /// GET /settlements/balance
    pub async fn balance(&self) -> Result<ApiResponse<Balance>> {
        self.send_json(ApiRequest::get(["settlements", "balance"])).await
    }

    /// Request a payout; without a phone the service uses the merchant's settlement number
    ///
    /// POST /settlements/request
    pub async fn request_settlement(
        &self,
        amount: u64,
        recipient_phone: Option<&str>,
    ) -> Result<ApiResponse<Settlement>> {
        let body = SettlementRequest {
            amount,
            recipient_phone: recipient_phone
                .map(str::trim)
                .filter(|phone| !phone.is_empty())
                .map(str::to_string),
        };
        let request = ApiRequest::post(["settlements", "request"]).json(&body)?;
        self.send_json(request).await
    }

    /// GET /settlements?page={page}&limit={limit}&status={status}
    pub async fn list_settlements(&self, query: &SettlementQuery) -> Result<ApiResponse<SettlementPage>> {
        let request = ApiRequest::get(["settlements"])
            .query("page", query.page)
            .query("limit", query.limit)
            .query_opt("status", query.status);
        self.send_json(request).await
    }
}
