//! In-memory entity store adapter.

use std::collections::HashMap;
use std::sync::Mutex;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rust_decimal::Decimal;

use mockpay_types::{
    Account, Charge, Customer, DomainError, EntityStore, PaymentIntent, PaymentMethodType, Refund,
    RepoError,
};

// ─────────────────────────────────────────────────────────────────────────────
// In-memory Store
// ─────────────────────────────────────────────────────────────────────────────

/// Process-local store for every entity kind.
///
/// Customers, intents, charges and refunds live in sharded `DashMap`s.
/// Ledger accounts live in a map that is fixed at construction, one
/// `Mutex` per payment method type, so balance updates on one account
/// never wait on another.
pub struct InMemoryStore {
    customers: DashMap<String, Customer>,
    intents: DashMap<String, PaymentIntent>,
    charges: DashMap<String, Charge>,
    refunds: DashMap<String, Refund>,
    accounts: HashMap<PaymentMethodType, Mutex<Account>>,
}

impl InMemoryStore {
    /// Creates a store holding one account per payment method type, each
    /// seeded with `initial_balance`, and no other records.
    pub fn new(initial_balance: Decimal) -> Self {
        Self::with_accounts(PaymentMethodType::ALL.map(|t| (t, initial_balance)))
    }

    /// Creates a store holding exactly the given accounts.
    pub fn with_accounts(accounts: impl IntoIterator<Item = (PaymentMethodType, Decimal)>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|(payment_type, balance)| {
                (payment_type, Mutex::new(Account::new(payment_type, balance)))
            })
            .collect();

        Self {
            customers: DashMap::new(),
            intents: DashMap::new(),
            charges: DashMap::new(),
            refunds: DashMap::new(),
            accounts,
        }
    }

    fn account_slot(&self, payment_type: PaymentMethodType) -> Option<&Mutex<Account>> {
        self.accounts.get(&payment_type)
    }
}

fn insert_unique<V: Clone>(
    map: &DashMap<String, V>,
    kind: &str,
    id: &str,
    value: V,
) -> Result<V, RepoError> {
    match map.entry(id.to_string()) {
        Entry::Occupied(_) => Err(RepoError::Conflict(format!("{} {} already exists", kind, id))),
        Entry::Vacant(slot) => {
            slot.insert(value.clone());
            tracing::debug!(kind, id, "stored");
            Ok(value)
        }
    }
}

fn poisoned(payment_type: PaymentMethodType) -> RepoError {
    RepoError::Internal(format!("account lock poisoned: {}", payment_type))
}

// ─────────────────────────────────────────────────────────────────────────────
// Port implementation
// ─────────────────────────────────────────────────────────────────────────────

impl EntityStore for InMemoryStore {
    fn insert_customer(&self, customer: Customer) -> Result<Customer, RepoError> {
        let id = customer.id.clone();
        insert_unique(&self.customers, "customer", &id, customer)
    }

    fn get_customer(&self, id: &str) -> Result<Option<Customer>, RepoError> {
        Ok(self.customers.get(id).map(|c| c.clone()))
    }

    fn insert_payment_intent(&self, intent: PaymentIntent) -> Result<PaymentIntent, RepoError> {
        let id = intent.id.clone();
        insert_unique(&self.intents, "payment_intent", &id, intent)
    }

    fn get_payment_intent(&self, id: &str) -> Result<Option<PaymentIntent>, RepoError> {
        Ok(self.intents.get(id).map(|i| i.clone()))
    }

    fn mutate_payment_intent<F, T>(&self, id: &str, f: F) -> Result<T, RepoError>
    where
        F: FnOnce(&mut PaymentIntent) -> Result<T, RepoError>,
    {
        let mut entry = self.intents.get_mut(id).ok_or(RepoError::NotFound)?;

        // Work on a copy so a failing closure leaves the stored intent as it was.
        let mut draft = entry.clone();
        let out = f(&mut draft)?;
        *entry = draft;

        tracing::debug!(id, status = %entry.status, "payment intent updated");
        Ok(out)
    }

    fn insert_charge(&self, charge: Charge) -> Result<Charge, RepoError> {
        let id = charge.id.clone();
        insert_unique(&self.charges, "charge", &id, charge)
    }

    fn get_charge(&self, id: &str) -> Result<Option<Charge>, RepoError> {
        Ok(self.charges.get(id).map(|c| c.clone()))
    }

    fn insert_refund(&self, refund: Refund) -> Result<Refund, RepoError> {
        let id = refund.id.clone();
        insert_unique(&self.refunds, "refund", &id, refund)
    }

    fn get_refund(&self, id: &str) -> Result<Option<Refund>, RepoError> {
        Ok(self.refunds.get(id).map(|r| r.clone()))
    }

    fn get_account(&self, payment_type: PaymentMethodType) -> Result<Option<Account>, RepoError> {
        match self.account_slot(payment_type) {
            Some(slot) => {
                let account = slot.lock().map_err(|_| poisoned(payment_type))?;
                Ok(Some(account.clone()))
            }
            None => Ok(None),
        }
    }

    fn list_accounts(&self) -> Result<Vec<Account>, RepoError> {
        let mut accounts = Vec::with_capacity(self.accounts.len());
        for payment_type in PaymentMethodType::ALL {
            if let Some(account) = self.get_account(payment_type)? {
                accounts.push(account);
            }
        }
        Ok(accounts)
    }

    fn mutate_account<F>(&self, payment_type: PaymentMethodType, f: F) -> Result<Account, RepoError>
    where
        F: FnOnce(Decimal) -> Result<Decimal, DomainError>,
    {
        let slot = self.account_slot(payment_type).ok_or(RepoError::NotFound)?;
        let mut account = slot.lock().map_err(|_| poisoned(payment_type))?;

        let balance = f(account.balance)?;
        tracing::debug!(
            account = %payment_type,
            from = %account.balance,
            to = %balance,
            "balance updated"
        );
        account.balance = balance;

        Ok(account.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockpay_types::LedgerOperation;
    use mockpay_types::domain::Amount;
    use rust_decimal_macros::dec;

    fn store() -> InMemoryStore {
        InMemoryStore::new(dec!(5000))
    }

    fn intent(id: &str) -> PaymentIntent {
        PaymentIntent::new(
            id.to_string(),
            format!("{}_secret_abc123", id),
            1200,
            "thb",
            "pm_mock_visa",
            "test",
        )
    }

    #[test]
    fn test_customer_round_trip() {
        let store = store();
        store
            .insert_customer(Customer::new("cus_mock_1", "Ruff", "ruff@example.com", 1))
            .unwrap();

        let found = store.get_customer("cus_mock_1").unwrap().unwrap();
        assert_eq!(found.name, "Ruff");
        assert!(store.get_customer("cus_mock_2").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_conflicts() {
        let store = store();
        store.insert_payment_intent(intent("pi_mock_1")).unwrap();

        let result = store.insert_payment_intent(intent("pi_mock_1"));
        assert!(matches!(result, Err(RepoError::Conflict(_))));
    }

    #[test]
    fn test_all_accounts_seeded() {
        let store = store();
        let accounts = store.list_accounts().unwrap();
        let types: Vec<_> = accounts.iter().map(|a| a.payment_type).collect();
        assert_eq!(types, PaymentMethodType::ALL.to_vec());
        assert!(accounts.iter().all(|a| a.balance == dec!(5000)));
    }

    #[test]
    fn test_unknown_account_is_not_found() {
        let store = InMemoryStore::with_accounts([(PaymentMethodType::Cash, dec!(10))]);
        assert!(store.get_account(PaymentMethodType::CreditCard).unwrap().is_none());

        let result = store.mutate_account(PaymentMethodType::CreditCard, |b| Ok(b + dec!(1)));
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[test]
    fn test_failed_mutation_leaves_balance() {
        let store = store();
        let amount = Amount::new(dec!(6000)).unwrap();

        let result = store.mutate_account(PaymentMethodType::CreditCard, |b| {
            LedgerOperation::Withdraw.apply(b, amount)
        });

        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::InsufficientBalance { .. }))
        ));
        let account = store.get_account(PaymentMethodType::CreditCard).unwrap().unwrap();
        assert_eq!(account.balance, dec!(5000));
    }

    #[test]
    fn test_failed_intent_mutation_rolls_back() {
        let store = store();
        store.insert_payment_intent(intent("pi_mock_1")).unwrap();

        let result: Result<(), RepoError> = store.mutate_payment_intent("pi_mock_1", |intent| {
            intent.confirm()?;
            Err(RepoError::Conflict("charge id taken".into()))
        });

        assert!(result.is_err());
        let stored = store.get_payment_intent("pi_mock_1").unwrap().unwrap();
        assert!(!stored.is_confirmed());
    }

    #[test]
    fn test_mutate_unknown_intent() {
        let store = store();
        let result = store.mutate_payment_intent("pi_mock_404", |intent| Ok(intent.amount));
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[test]
    fn test_concurrent_deposits_are_serialized() {
        let store = store();
        let threads = 16;
        let per_thread = 50;

        std::thread::scope(|s| {
            for _ in 0..threads {
                s.spawn(|| {
                    for _ in 0..per_thread {
                        let amount = Amount::new(dec!(100)).unwrap();
                        store
                            .mutate_account(PaymentMethodType::Cash, |b| {
                                LedgerOperation::Deposit.apply(b, amount)
                            })
                            .unwrap();
                    }
                });
            }
        });

        let cash = store.get_account(PaymentMethodType::Cash).unwrap().unwrap();
        let expected = dec!(5000) + dec!(100) * Decimal::from(threads * per_thread);
        assert_eq!(cash.balance, expected);
    }

    #[test]
    fn test_concurrent_withdrawals_never_overdraw() {
        let store = InMemoryStore::new(dec!(1000));

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..10 {
                        let amount = Amount::new(dec!(30)).unwrap();
                        let _ = store.mutate_account(PaymentMethodType::Cash, |b| {
                            LedgerOperation::Withdraw.apply(b, amount)
                        });
                    }
                });
            }
        });

        // 80 attempts of 30 against 1000: exactly 33 succeed.
        let cash = store.get_account(PaymentMethodType::Cash).unwrap().unwrap();
        assert_eq!(cash.balance, dec!(10));
    }
}
