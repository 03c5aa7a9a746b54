//! Ledger account domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::money::Amount;
use crate::error::DomainError;

/// Payment method types that own a ledger account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum PaymentMethodType {
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "mobilebanking")]
    MobileBanking,
    #[serde(rename = "creditcard")]
    CreditCard,
    #[serde(rename = "meowth-wallet")]
    MeowthWallet,
}

impl PaymentMethodType {
    pub const ALL: [PaymentMethodType; 4] = [
        PaymentMethodType::Cash,
        PaymentMethodType::MobileBanking,
        PaymentMethodType::CreditCard,
        PaymentMethodType::MeowthWallet,
    ];

    /// Wire token for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethodType::Cash => "cash",
            PaymentMethodType::MobileBanking => "mobilebanking",
            PaymentMethodType::CreditCard => "creditcard",
            PaymentMethodType::MeowthWallet => "meowth-wallet",
        }
    }
}

impl fmt::Display for PaymentMethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethodType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::UnsupportedPaymentType(s.to_string()))
    }
}

/// Balance bucket for one payment method type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Account {
    #[serde(rename = "type")]
    pub payment_type: PaymentMethodType,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 5000.0)]
    pub balance: Decimal,
}

impl Account {
    pub fn new(payment_type: PaymentMethodType, balance: Decimal) -> Self {
        Self {
            payment_type,
            balance,
        }
    }
}

/// The four balance-affecting ledger operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOperation {
    Deposit,
    Withdraw,
    RefundToAccount,
    ProcessPayment,
}

impl LedgerOperation {
    pub fn is_debit(&self) -> bool {
        matches!(self, LedgerOperation::Withdraw | LedgerOperation::ProcessPayment)
    }

    /// Computes the balance after applying `amount`.
    ///
    /// Debits never take the balance below zero; credits never overflow it.
    pub fn apply(&self, balance: Decimal, amount: Amount) -> Result<Decimal, DomainError> {
        let amount = amount.value();
        if !self.is_debit() {
            return balance
                .checked_add(amount)
                .ok_or(DomainError::BalanceOverflow);
        }
        if balance < amount {
            return Err(DomainError::InsufficientBalance {
                available: balance,
                requested: amount,
            });
        }
        balance
            .checked_sub(amount)
            .ok_or(DomainError::BalanceOverflow)
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            LedgerOperation::Deposit => "Deposit successful",
            LedgerOperation::Withdraw => "Withdrawal successful",
            LedgerOperation::RefundToAccount => "Refund successful",
            LedgerOperation::ProcessPayment => "Payment processed successfully",
        }
    }
}

impl fmt::Display for LedgerOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerOperation::Deposit => write!(f, "DEPOSIT"),
            LedgerOperation::Withdraw => write!(f, "WITHDRAW"),
            LedgerOperation::RefundToAccount => write!(f, "REFUND"),
            LedgerOperation::ProcessPayment => write!(f, "PAYMENT"),
        }
    }
}

/// Outcome of a committed ledger operation.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerReceipt {
    pub operation: LedgerOperation,
    pub transaction_id: String,
    /// Account snapshot after the operation committed
    pub account: Account,
    pub order_id: Option<String>,
    pub reference_id: Option<String>,
}
