//! # Mockpay Store
//!
//! Concrete adapters for the ports defined in `mockpay-types`:
//! - [`InMemoryStore`] implements `EntityStore` with per-account locking
//! - [`RandomIdGenerator`] implements `IdGenerator`
//! - [`fixtures`] preloads the sample records a fresh mock server exposes

pub mod fixtures;
pub mod ids;
pub mod memory;

pub use ids::RandomIdGenerator;
pub use memory::InMemoryStore;

use mockpay_types::RepoError;
use rust_decimal::Decimal;

/// Balance every ledger account starts with unless configured otherwise.
pub fn default_initial_balance() -> Decimal {
    Decimal::new(5000, 0)
}

/// Build a ready-to-use store.
///
/// Every ledger account is seeded with `initial_balance`. When
/// `seed_fixtures` is set the sample customers, intent, charge and refund
/// are loaded as well.
///
/// # Examples
///
/// ```
/// use mockpay_store::{build_store, default_initial_balance};
/// use mockpay_types::{EntityStore, PaymentMethodType};
///
/// let store = build_store(default_initial_balance(), true).unwrap();
/// assert!(store.get_customer("cus_mock_12345").unwrap().is_some());
/// let cash = store.get_account(PaymentMethodType::Cash).unwrap().unwrap();
/// assert_eq!(cash.balance, default_initial_balance());
/// ```
pub fn build_store(initial_balance: Decimal, seed_fixtures: bool) -> Result<InMemoryStore, RepoError> {
    let store = InMemoryStore::new(initial_balance);
    if seed_fixtures {
        fixtures::seed(&store)?;
    }
    Ok(store)
}
