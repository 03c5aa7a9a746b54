//! Positive ledger amounts.

use rust_decimal::Decimal;

use crate::error::DomainError;

/// A strictly positive fixed-point amount for ledger operations.
///
/// Wraps `rust_decimal::Decimal` so a zero or negative value can never
/// reach a balance mutation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidAmount)
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}
