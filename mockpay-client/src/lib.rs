//! # Mockpay Client SDK
//!
//! A typed Rust client for the mock payment API.
//!
//! Ledger calls return a [`LedgerResponse`] whether or not the operation
//! was accepted; check `success` before trusting `account`.

use mockpay_types::{
    Account, AccountListResponse, AccountResponse, Charges, ConfirmPaymentIntentRequest,
    ConfirmPaymentIntentResponse, CreateCustomerRequest, CreatePaymentIntentRequest,
    CreateRefundRequest, Customer, CustomerResponse, DepositRequest, LedgerResponse,
    PaymentIntent, PaymentIntentResponse, ProcessPaymentRequest, Refund, RefundResponse,
    RefundToAccountRequest, TestWebhookRequest, TestWebhookResponse, WithdrawRequest,
};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Mock payment API client.
#[derive(Debug, Clone)]
pub struct MockPayClient {
    base_url: String,
    http: Client,
}

impl MockPayClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Customers, intents, refunds
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_customer(&self, name: &str, email: &str) -> Result<Customer, ClientError> {
        let req = CreateCustomerRequest {
            name: name.to_string(),
            email: email.to_string(),
        };
        let resp: CustomerResponse = self.post("/customers", &req).await?;
        Ok(resp.customer)
    }

    pub async fn retrieve_customer(&self, id: &str) -> Result<Customer, ClientError> {
        let resp: CustomerResponse = self.get(&format!("/customers/{}", id)).await?;
        Ok(resp.customer)
    }

    pub async fn create_payment_intent(
        &self,
        amount: u64,
        currency: &str,
        payment_method: &str,
        description: &str,
    ) -> Result<PaymentIntent, ClientError> {
        let req = CreatePaymentIntentRequest {
            amount,
            currency: currency.to_string(),
            payment_method: payment_method.to_string(),
            description: description.to_string(),
        };
        let resp: PaymentIntentResponse = self.post("/payment-intents", &req).await?;
        Ok(resp.payment_intent)
    }

    pub async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, ClientError> {
        let resp: PaymentIntentResponse = self.get(&format!("/payment-intents/{}", id)).await?;
        Ok(resp.payment_intent)
    }

    /// Confirms an intent; returns the succeeded intent and its charge.
    pub async fn confirm_payment_intent(
        &self,
        id: &str,
    ) -> Result<(PaymentIntent, Charges), ClientError> {
        let req = ConfirmPaymentIntentRequest { id: id.to_string() };
        let resp: ConfirmPaymentIntentResponse =
            self.post("/payment-intents/confirm", &req).await?;
        Ok((resp.payment_intent, resp.charges))
    }

    pub async fn create_refund(
        &self,
        payment_intent: &str,
        amount: u64,
    ) -> Result<Refund, ClientError> {
        let req = CreateRefundRequest {
            payment_intent: payment_intent.to_string(),
            amount,
        };
        let resp: RefundResponse = self.post("/refunds", &req).await?;
        Ok(resp.refund)
    }

    pub async fn test_webhook(&self, event_type: &str, data: &str) -> Result<bool, ClientError> {
        let req = TestWebhookRequest {
            event_type: event_type.to_string(),
            data: data.to_string(),
        };
        let resp: TestWebhookResponse = self.post("/webhooks/test", &req).await?;
        Ok(resp.received)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ledger
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn get_account(&self, payment_type: &str) -> Result<Account, ClientError> {
        let resp: AccountResponse = self.get(&format!("/accounts/{}", payment_type)).await?;
        Ok(resp.account)
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, ClientError> {
        let resp: AccountListResponse = self.get("/accounts").await?;
        Ok(resp.data)
    }

    pub async fn deposit(
        &self,
        payment_type: &str,
        amount: Decimal,
    ) -> Result<LedgerResponse, ClientError> {
        let req = DepositRequest {
            payment_type: payment_type.to_string(),
            amount,
        };
        self.post_ledger("/accounts/deposit", &req).await
    }

    pub async fn withdraw(
        &self,
        payment_type: &str,
        amount: Decimal,
    ) -> Result<LedgerResponse, ClientError> {
        let req = WithdrawRequest {
            payment_type: payment_type.to_string(),
            amount,
        };
        self.post_ledger("/accounts/withdraw", &req).await
    }

    pub async fn refund_to_account(
        &self,
        payment_type: &str,
        amount: Decimal,
        reference_id: &str,
    ) -> Result<LedgerResponse, ClientError> {
        let req = RefundToAccountRequest {
            payment_type: payment_type.to_string(),
            amount,
            reference_id: reference_id.to_string(),
        };
        self.post_ledger("/accounts/refund", &req).await
    }

    pub async fn process_payment(
        &self,
        payment_type: &str,
        amount: Decimal,
        order_id: &str,
    ) -> Result<LedgerResponse, ClientError> {
        let req = ProcessPaymentRequest {
            payment_type: payment_type.to_string(),
            amount,
            order_id: order_id.to_string(),
        };
        self.post_ledger("/accounts/process-payment", &req).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Like `post`, but a 400 carrying a ledger body is a result, not an error.
    async fn post_ledger<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<LedgerResponse, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        if resp.status() == StatusCode::BAD_REQUEST {
            let body = resp.text().await?;
            return match serde_json::from_str::<LedgerResponse>(&body) {
                Ok(rejected) => Ok(rejected),
                Err(_) => Err(ClientError::Api {
                    status: StatusCode::BAD_REQUEST.as_u16(),
                    message: error_message(body),
                }),
            };
        }
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(body),
            })
        }
    }
}

/// Pulls `error` out of an `{"error": .., "code": ..}` body, falling back to the raw text.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body)
}
