//! Refund record domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Succeeded,
}

/// An informational refund record linked to a payment intent id.
///
/// Creating one never touches a ledger balance and the referenced
/// intent is not required to exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Refund {
    #[schema(example = "re_mock_444")]
    pub id: String,
    /// Always `"refund"`
    pub object: String,
    #[schema(example = 600)]
    pub amount: u64,
    #[schema(example = "thb")]
    pub currency: String,
    pub status: RefundStatus,
    /// Referenced payment intent id
    #[schema(example = "pi_mock_98765")]
    pub payment_intent: String,
}

impl Refund {
    pub const OBJECT: &'static str = "refund";

    /// Currency used when the referenced intent is unknown.
    pub const DEFAULT_CURRENCY: &'static str = "thb";

    pub fn new(
        id: String,
        payment_intent: impl Into<String>,
        amount: u64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id,
            object: Self::OBJECT.to_string(),
            amount,
            currency: currency.into(),
            status: RefundStatus::Succeeded,
            payment_intent: payment_intent.into(),
        }
    }
}
