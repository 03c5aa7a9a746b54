//! Sample records a freshly started mock server exposes.

use mockpay_types::{Charge, Customer, EntityStore, PaymentIntent, Refund, RepoError};

pub const FIXTURE_CUSTOMER_ID: &str = "cus_mock_12345";
pub const FIXTURE_INTENT_ID: &str = "pi_mock_98765";
pub const FIXTURE_CHARGE_ID: &str = "ch_mock_555";
pub const FIXTURE_REFUND_ID: &str = "re_mock_444";

/// Loads the sample customers, intent, charge and refund into `store`.
pub fn seed<S: EntityStore>(store: &S) -> Result<(), RepoError> {
    store.insert_customer(Customer::new(
        FIXTURE_CUSTOMER_ID,
        "Ruff",
        "ruff@example.com",
        1734567890,
    ))?;
    store.insert_customer(Customer::new(
        "cus_mock_67890",
        "John Doe",
        "john@example.com",
        1734567800,
    ))?;

    let intent = PaymentIntent::new(
        FIXTURE_INTENT_ID.to_string(),
        format!("{}_secret_abc123", FIXTURE_INTENT_ID),
        1200,
        "thb",
        "pm_mock_visa",
        "Food delivery payment",
    );
    store.insert_charge(Charge::for_intent(FIXTURE_CHARGE_ID.to_string(), &intent))?;
    store.insert_payment_intent(intent)?;

    store.insert_refund(Refund::new(
        FIXTURE_REFUND_ID.to_string(),
        FIXTURE_INTENT_ID,
        600,
        "thb",
    ))?;

    tracing::debug!("fixture records loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;
    use mockpay_types::PaymentIntentStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn test_seed_loads_sample_records() {
        let store = InMemoryStore::new(dec!(5000));
        seed(&store).unwrap();

        let customer = store.get_customer(FIXTURE_CUSTOMER_ID).unwrap().unwrap();
        assert_eq!(customer.email, "ruff@example.com");
        assert_eq!(customer.created, 1734567890);

        let intent = store.get_payment_intent(FIXTURE_INTENT_ID).unwrap().unwrap();
        assert_eq!(intent.status, PaymentIntentStatus::RequiresConfirmation);
        assert_eq!(intent.client_secret, "pi_mock_98765_secret_abc123");

        let charge = store.get_charge(FIXTURE_CHARGE_ID).unwrap().unwrap();
        assert_eq!(charge.amount, 1200);

        let refund = store.get_refund(FIXTURE_REFUND_ID).unwrap().unwrap();
        assert_eq!(refund.amount, 600);
        assert_eq!(refund.payment_intent, FIXTURE_INTENT_ID);
    }

    #[test]
    fn test_seed_twice_conflicts() {
        let store = InMemoryStore::new(dec!(5000));
        seed(&store).unwrap();
        assert!(matches!(seed(&store), Err(RepoError::Conflict(_))));
    }
}
