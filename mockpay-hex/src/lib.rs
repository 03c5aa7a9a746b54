//! # Mockpay Hex
//!
//! Core engines and HTTP adapter for the mock payment provider.
//!
//! ## Architecture
//!
//! - `ledger` - Ledger Engine (deposit, withdraw, refund-to-account, process-payment)
//! - `lifecycle` - Intent Lifecycle Engine (create and confirm payment intents)
//! - `service` - Facade the transport layer calls into
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Everything is generic over `S: EntityStore`, so any store adapter can be
//! injected.

pub mod inbound;
pub mod ledger;
pub mod lifecycle;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use ledger::LedgerEngine;
pub use lifecycle::IntentLifecycle;
pub use service::PaymentService;
