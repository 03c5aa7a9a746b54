//! Payment intent and charge domain models.
//!
//! An intent starts in `requires_confirmation` and moves to `succeeded`
//! exactly once. Confirmation is what produces a [`Charge`].

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::DomainError;

/// Lifecycle state of a payment intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresConfirmation,
    Succeeded,
}

impl PaymentIntentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentIntentStatus::RequiresConfirmation => "requires_confirmation",
            PaymentIntentStatus::Succeeded => "succeeded",
        }
    }
}

impl fmt::Display for PaymentIntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An intended collection of funds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaymentIntent {
    #[schema(example = "pi_mock_98765")]
    pub id: String,
    /// Always `"payment_intent"`
    pub object: String,
    /// Amount in minor currency units
    #[schema(example = 1200)]
    pub amount: u64,
    #[schema(example = "thb")]
    pub currency: String,
    pub status: PaymentIntentStatus,
    #[schema(example = "pi_mock_98765_secret_abc123")]
    pub client_secret: String,
    pub description: String,
    #[schema(example = "pm_mock_visa")]
    pub payment_method: String,
}

impl PaymentIntent {
    pub const OBJECT: &'static str = "payment_intent";

    /// Creates an intent awaiting confirmation.
    pub fn new(
        id: String,
        client_secret: String,
        amount: u64,
        currency: impl Into<String>,
        payment_method: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            object: Self::OBJECT.to_string(),
            amount,
            currency: currency.into(),
            status: PaymentIntentStatus::RequiresConfirmation,
            client_secret,
            description: description.into(),
            payment_method: payment_method.into(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == PaymentIntentStatus::Succeeded
    }

    /// Moves the intent to `succeeded`.
    ///
    /// The transition is one-way; a second confirmation is rejected.
    pub fn confirm(&mut self) -> Result<(), DomainError> {
        match self.status {
            PaymentIntentStatus::RequiresConfirmation => {
                self.status = PaymentIntentStatus::Succeeded;
                Ok(())
            }
            PaymentIntentStatus::Succeeded => {
                Err(DomainError::IntentAlreadyConfirmed(self.id.clone()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChargeStatus {
    Succeeded,
}

/// Funds actually collected for a confirmed intent. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Charge {
    #[schema(example = "ch_mock_555")]
    pub id: String,
    /// Always `"charge"`
    pub object: String,
    pub status: ChargeStatus,
    #[schema(example = 1200)]
    pub amount: u64,
    pub currency: String,
    pub payment_method: String,
}

impl Charge {
    pub const OBJECT: &'static str = "charge";

    /// Builds the charge that mirrors an intent's amount, currency and payment method.
    pub fn for_intent(id: String, intent: &PaymentIntent) -> Self {
        Self {
            id,
            object: Self::OBJECT.to_string(),
            status: ChargeStatus::Succeeded,
            amount: intent.amount,
            currency: intent.currency.clone(),
            payment_method: intent.payment_method.clone(),
        }
    }
}

/// List wrapper used in confirmation responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Charges {
    pub data: Vec<Charge>,
}

impl From<Charge> for Charges {
    fn from(charge: Charge) -> Self {
        Self { data: vec![charge] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent() -> PaymentIntent {
        PaymentIntent::new(
            "pi_mock_1".into(),
            "pi_mock_1_secret_abc123".into(),
            1200,
            "thb",
            "pm_mock_visa",
            "Food delivery payment",
        )
    }

    #[test]
    fn test_new_intent_requires_confirmation() {
        let intent = intent();
        assert_eq!(intent.status, PaymentIntentStatus::RequiresConfirmation);
        assert_eq!(intent.object, "payment_intent");
        assert!(!intent.is_confirmed());
    }

    #[test]
    fn test_confirm_is_one_way() {
        let mut intent = intent();
        intent.confirm().unwrap();
        assert_eq!(intent.status, PaymentIntentStatus::Succeeded);

        let result = intent.confirm();
        assert!(matches!(result, Err(DomainError::IntentAlreadyConfirmed(id)) if id == "pi_mock_1"));
        assert_eq!(intent.status, PaymentIntentStatus::Succeeded);
    }

    #[test]
    fn test_charge_mirrors_intent() {
        let intent = intent();
        let charge = Charge::for_intent("ch_mock_1".into(), &intent);
        assert_eq!(charge.amount, 1200);
        assert_eq!(charge.currency, "thb");
        assert_eq!(charge.payment_method, "pm_mock_visa");
        assert_eq!(charge.status, ChargeStatus::Succeeded);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&PaymentIntentStatus::RequiresConfirmation).unwrap();
        assert_eq!(json, "\"requires_confirmation\"");
    }
}
