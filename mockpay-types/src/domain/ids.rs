//! Identifier kinds.

use std::fmt;

/// The kind of entity an identifier is minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Customer,
    PaymentIntent,
    Charge,
    Refund,
    Transaction,
}

impl IdKind {
    /// Prefix used in front of `_mock_`.
    pub fn prefix(&self) -> &'static str {
        match self {
            IdKind::Customer => "cus",
            IdKind::PaymentIntent => "pi",
            IdKind::Charge => "ch",
            IdKind::Refund => "re",
            IdKind::Transaction => "txn",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
