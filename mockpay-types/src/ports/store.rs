//! Entity store port.
//!
//! This is the primary port of the core. The in-memory adapter implements it;
//! every balance or intent mutation goes through the `mutate_*` methods.

use rust_decimal::Decimal;

use crate::domain::{Account, Charge, Customer, PaymentIntent, PaymentMethodType, Refund};
use crate::error::{DomainError, RepoError};

/// Concurrency-safe storage for every entity kind.
///
/// Getters hand out clones, never references into the store. `get_*` on an
/// unknown key returns `Ok(None)`.
pub trait EntityStore: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Customers
    // ─────────────────────────────────────────────────────────────────────────────

    /// Stores a new customer. Fails with `Conflict` if the id is taken.
    fn insert_customer(&self, customer: Customer) -> Result<Customer, RepoError>;

    fn get_customer(&self, id: &str) -> Result<Option<Customer>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment intents & charges
    // ─────────────────────────────────────────────────────────────────────────────

    /// Stores a new intent. Fails with `Conflict` if the id is taken.
    fn insert_payment_intent(&self, intent: PaymentIntent) -> Result<PaymentIntent, RepoError>;

    fn get_payment_intent(&self, id: &str) -> Result<Option<PaymentIntent>, RepoError>;

    /// Runs `f` against the stored intent while holding that intent's lock.
    ///
    /// Fails with `NotFound` if the id is unknown. Changes made by `f` are
    /// visible to other callers only after it returns.
    fn mutate_payment_intent<F, T>(&self, id: &str, f: F) -> Result<T, RepoError>
    where
        F: FnOnce(&mut PaymentIntent) -> Result<T, RepoError>;

    /// Stores a new charge. Fails with `Conflict` if the id is taken.
    fn insert_charge(&self, charge: Charge) -> Result<Charge, RepoError>;

    fn get_charge(&self, id: &str) -> Result<Option<Charge>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Refund records
    // ─────────────────────────────────────────────────────────────────────────────

    /// Stores a new refund record. Fails with `Conflict` if the id is taken.
    fn insert_refund(&self, refund: Refund) -> Result<Refund, RepoError>;

    fn get_refund(&self, id: &str) -> Result<Option<Refund>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Ledger accounts (MUST serialize updates per account)
    // ─────────────────────────────────────────────────────────────────────────────

    fn get_account(&self, payment_type: PaymentMethodType) -> Result<Option<Account>, RepoError>;

    /// Lists every ledger account in `PaymentMethodType::ALL` order.
    fn list_accounts(&self) -> Result<Vec<Account>, RepoError>;

    /// Replaces an account's balance with `f(current_balance)`.
    ///
    /// Runs under a lock scoped to `payment_type` only. If `f` fails the
    /// balance is left untouched. Fails with `NotFound` for an account the
    /// store does not hold.
    fn mutate_account<F>(&self, payment_type: PaymentMethodType, f: F) -> Result<Account, RepoError>
    where
        F: FnOnce(Decimal) -> Result<Decimal, DomainError>;
}
