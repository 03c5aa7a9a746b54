//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use mockpay_types::{
    AccountListResponse, AccountResponse, AppError, ConfirmPaymentIntentRequest,
    ConfirmPaymentIntentResponse, CreateCustomerRequest, CreatePaymentIntentRequest,
    CreateRefundRequest, CustomerResponse, DepositRequest, EntityStore, LedgerReceipt,
    LedgerResponse, PaymentIntentResponse, ProcessPaymentRequest, RefundResponse,
    RefundToAccountRequest, TestWebhookRequest, TestWebhookResponse, WithdrawRequest,
};

use crate::PaymentService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<S: EntityStore> {
    pub service: PaymentService<S>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::InvalidAmount
        | AppError::InsufficientBalance { .. }
        | AppError::UnsupportedPaymentType(_)
        | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({
            "error": self.0.to_string(),
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Turns a ledger outcome into its response body.
///
/// Rejections still answer with a `LedgerResponse` (`success: false`) and
/// a 400; only store failures escape as an `ApiError`.
fn ledger_reply(
    outcome: Result<LedgerReceipt, AppError>,
    order_id: Option<String>,
    reference_id: Option<String>,
) -> Result<Response, ApiError> {
    match outcome {
        Ok(receipt) => Ok(Json(LedgerResponse::from(receipt)).into_response()),
        Err(err @ AppError::Internal(_)) => Err(err.into()),
        Err(err) => {
            let mut body = LedgerResponse::rejected(err.to_string());
            if let Some(order_id) = order_id.filter(|id| !id.is_empty()) {
                body = body.with_order_id(order_id);
            }
            if let Some(reference_id) = reference_id.filter(|id| !id.is_empty()) {
                body = body.with_reference_id(reference_id);
            }
            Ok((status_for(&err), Json(body)).into_response())
        }
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ─────────────────────────────────────────────────────────────────────────────
// Customers
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn create_customer<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.service.create_customer(req)?;
    Ok((StatusCode::CREATED, Json(CustomerResponse { customer })))
}

#[tracing::instrument(skip(state))]
pub async fn get_customer<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.service.retrieve_customer(&id)?;
    Ok(Json(CustomerResponse { customer }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment intents
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req), fields(amount = req.amount, currency = %req.currency))]
pub async fn create_payment_intent<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreatePaymentIntentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_intent = state.service.create_payment_intent(req)?;
    Ok((StatusCode::CREATED, Json(PaymentIntentResponse { payment_intent })))
}

#[tracing::instrument(skip(state))]
pub async fn get_payment_intent<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_intent = state.service.retrieve_payment_intent(&id)?;
    Ok(Json(PaymentIntentResponse { payment_intent }))
}

#[tracing::instrument(skip(state, req), fields(id = %req.id))]
pub async fn confirm_payment_intent<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<ConfirmPaymentIntentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (payment_intent, charges) = state.service.confirm_payment_intent(req)?;
    Ok(Json(ConfirmPaymentIntentResponse {
        payment_intent,
        charges,
    }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Refund records and webhooks
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req), fields(payment_intent = %req.payment_intent, amount = req.amount))]
pub async fn create_refund<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateRefundRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let refund = state.service.create_refund(req)?;
    Ok((StatusCode::CREATED, Json(RefundResponse { refund })))
}

/// Accepts any event and acknowledges it. Nothing is delivered anywhere.
#[tracing::instrument(skip(req), fields(event_type = %req.event_type))]
pub async fn test_webhook(Json(req): Json<TestWebhookRequest>) -> impl IntoResponse {
    tracing::info!(data = %req.data, "test webhook received");
    Json(TestWebhookResponse { received: true })
}

// ─────────────────────────────────────────────────────────────────────────────
// Ledger accounts
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state))]
pub async fn list_accounts<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let data = state.service.list_accounts()?;
    Ok(Json(AccountListResponse { data }))
}

#[tracing::instrument(skip(state))]
pub async fn get_account<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(payment_type): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state.service.get_account(&payment_type)?;
    Ok(Json(AccountResponse { account }))
}

#[tracing::instrument(skip(state, req), fields(account = %req.payment_type, amount = %req.amount))]
pub async fn deposit<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<DepositRequest>,
) -> Result<Response, ApiError> {
    ledger_reply(state.service.deposit(req), None, None)
}

#[tracing::instrument(skip(state, req), fields(account = %req.payment_type, amount = %req.amount))]
pub async fn withdraw<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<WithdrawRequest>,
) -> Result<Response, ApiError> {
    ledger_reply(state.service.withdraw(req), None, None)
}

#[tracing::instrument(skip(state, req), fields(account = %req.payment_type, amount = %req.amount))]
pub async fn refund_to_account<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<RefundToAccountRequest>,
) -> Result<Response, ApiError> {
    let reference_id = req.reference_id.clone();
    ledger_reply(state.service.refund_to_account(req), None, Some(reference_id))
}

#[tracing::instrument(skip(state, req), fields(account = %req.payment_type, order_id = %req.order_id))]
pub async fn process_payment<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<ProcessPaymentRequest>,
) -> Result<Response, ApiError> {
    let order_id = req.order_id.clone();
    ledger_reply(state.service.process_payment(req), Some(order_id), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_mapping_keeps_absent_and_rejected_apart() {
        assert_eq!(status_for(&AppError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&AppError::InvalidAmount), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&AppError::InsufficientBalance {
                available: dec!(1),
                requested: dec!(2)
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AppError::UnsupportedPaymentType("paypal".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&AppError::Conflict("x".into())), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&AppError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_rejected_ledger_reply_echoes_order_id() {
        let response = ledger_reply(
            Err(AppError::InvalidAmount),
            Some("ord_7".to_string()),
            None,
        )
        .ok()
        .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: LedgerResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(!body.success);
        assert_eq!(body.message, "Invalid amount");
        assert_eq!(body.order_id.as_deref(), Some("ord_7"));
        assert!(body.account.is_none());
    }

    #[test]
    fn test_internal_ledger_failure_is_an_api_error() {
        let result = ledger_reply(Err(AppError::Internal("poisoned".into())), None, None);
        assert!(result.is_err());
    }
}
