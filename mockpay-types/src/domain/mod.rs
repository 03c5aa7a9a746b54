//! Domain models for the mock payment provider.

pub mod customer;
pub mod ids;
pub mod intent;
pub mod ledger;
pub mod money;
pub mod refund;

pub use customer::Customer;
pub use ids::IdKind;
pub use intent::{Charge, ChargeStatus, Charges, PaymentIntent, PaymentIntentStatus};
pub use ledger::{Account, LedgerOperation, LedgerReceipt, PaymentMethodType};
pub use money::Amount;
pub use refund::{Refund, RefundStatus};
