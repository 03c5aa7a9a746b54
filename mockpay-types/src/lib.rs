//! # Mockpay Types
//!
//! Domain types and port traits for the mock payment provider.
//! This crate has ZERO IO dependencies - only data structures,
//! invariants, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Entities and value objects (Customer, PaymentIntent, Charge, Refund, Account)
//! - `ports/` - Traits the storage and identifier adapters implement
//! - `dto/` - Request and response bodies for the transport layer
//! - `error/` - Domain, store, and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

pub use domain::{
    Account, Amount, Charge, ChargeStatus, Charges, Customer, IdKind, LedgerOperation,
    LedgerReceipt, PaymentIntent, PaymentIntentStatus, PaymentMethodType, Refund, RefundStatus,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{EntityStore, IdGenerator};
