//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Account, Charges, Customer, LedgerReceipt, PaymentIntent, Refund};

// ─────────────────────────────────────────────────────────────────────────────
// Customer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    #[schema(example = "Ruff")]
    pub name: String,
    #[schema(example = "ruff@example.com")]
    pub email: String,
}

/// Wraps a created or retrieved customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub customer: Customer,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment intent DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a payment intent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentIntentRequest {
    /// Amount in minor currency units (e.g. satang)
    #[schema(example = 1200)]
    pub amount: u64,
    #[schema(example = "thb")]
    pub currency: String,
    #[schema(example = "pm_mock_visa")]
    pub payment_method: String,
    #[serde(default)]
    #[schema(example = "Food delivery payment")]
    pub description: String,
}

/// Wraps a created or retrieved payment intent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentIntentResponse {
    pub payment_intent: PaymentIntent,
}

/// Identifies the intent to confirm.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfirmPaymentIntentRequest {
    #[schema(example = "pi_mock_98765")]
    pub id: String,
}

/// The confirmed intent and the charge it produced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfirmPaymentIntentResponse {
    pub payment_intent: PaymentIntent,
    pub charges: Charges,
}

// ─────────────────────────────────────────────────────────────────────────────
// Refund record DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a refund against a payment intent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRefundRequest {
    #[schema(example = "pi_mock_98765")]
    pub payment_intent: String,
    /// Amount in minor currency units
    #[schema(example = 600)]
    pub amount: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefundResponse {
    pub refund: Refund,
}

// ─────────────────────────────────────────────────────────────────────────────
// Webhook stub DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestWebhookRequest {
    #[serde(rename = "type")]
    #[schema(example = "payment_intent.succeeded")]
    pub event_type: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestWebhookResponse {
    pub received: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Ledger DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to deposit into a ledger account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepositRequest {
    /// Payment method token (`cash`, `mobilebanking`, `creditcard`, `meowth-wallet`)
    #[serde(rename = "type")]
    #[schema(example = "cash")]
    pub payment_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 100.0)]
    pub amount: Decimal,
}

/// Request to withdraw from a ledger account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WithdrawRequest {
    #[serde(rename = "type")]
    #[schema(example = "creditcard")]
    pub payment_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 250.0)]
    pub amount: Decimal,
}

/// Request to credit a ledger account back.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefundToAccountRequest {
    #[serde(rename = "type")]
    #[schema(example = "meowth-wallet")]
    pub payment_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 50.0)]
    pub amount: Decimal,
    /// Carried through to the response, never validated
    #[serde(default)]
    #[schema(example = "txn_mock_100042")]
    pub reference_id: String,
}

/// Request to pay an order from a ledger account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessPaymentRequest {
    #[serde(rename = "type")]
    #[schema(example = "cash")]
    pub payment_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 200.0)]
    pub amount: Decimal,
    #[serde(default)]
    #[schema(example = "ord_1")]
    pub order_id: String,
}

/// Result of any ledger operation.
///
/// Rejections are reported here with `success: false` rather than as an error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LedgerResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[schema(example = "Deposit successful")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    /// Account after the operation (success only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
}

impl LedgerResponse {
    /// A failed operation; nothing was committed.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            message: message.into(),
            order_id: None,
            reference_id: None,
            account: None,
        }
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }
}

impl From<LedgerReceipt> for LedgerResponse {
    fn from(receipt: LedgerReceipt) -> Self {
        Self {
            success: true,
            transaction_id: Some(receipt.transaction_id),
            message: receipt.operation.success_message().to_string(),
            order_id: receipt.order_id,
            reference_id: receipt.reference_id,
            account: Some(receipt.account),
        }
    }
}

/// Wraps a single ledger account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub account: Account,
}

/// All ledger accounts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountListResponse {
    pub data: Vec<Account>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LedgerOperation, PaymentMethodType};
    use rust_decimal_macros::dec;

    #[test]
    fn test_ledger_request_accepts_integer_and_float_amounts() {
        let req: DepositRequest =
            serde_json::from_str(r#"{"type": "cash", "amount": 100}"#).unwrap();
        assert_eq!(req.payment_type, "cash");
        assert_eq!(req.amount, dec!(100));

        let req: ProcessPaymentRequest =
            serde_json::from_str(r#"{"type": "cash", "amount": 12.5, "order_id": "ord_1"}"#)
                .unwrap();
        assert_eq!(req.amount, dec!(12.5));
        assert_eq!(req.order_id, "ord_1");
    }

    #[test]
    fn test_rejected_response_omits_success_fields() {
        let json = serde_json::to_value(LedgerResponse::rejected("Insufficient balance")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Insufficient balance");
        assert!(json.get("transaction_id").is_none());
        assert!(json.get("account").is_none());
    }

    #[test]
    fn test_receipt_to_response() {
        let receipt = LedgerReceipt {
            operation: LedgerOperation::ProcessPayment,
            transaction_id: "txn_mock_100001".into(),
            account: Account::new(PaymentMethodType::Cash, dec!(4800)),
            order_id: Some("ord_1".into()),
            reference_id: None,
        };
        let resp = LedgerResponse::from(receipt);
        assert!(resp.success);
        assert_eq!(resp.order_id.as_deref(), Some("ord_1"));
        assert_eq!(resp.account.unwrap().balance, dec!(4800));
    }

    #[test]
    fn test_negative_intent_amount_is_rejected_on_decode() {
        let result = serde_json::from_str::<CreatePaymentIntentRequest>(
            r#"{"amount": -1, "currency": "thb", "payment_method": "pm_mock_visa"}"#,
        );
        assert!(result.is_err());
    }
}
