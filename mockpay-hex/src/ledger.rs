//! Ledger Engine
//!
//! Applies balance-affecting operations to ledger accounts. Every operation
//! follows the same steps: resolve the account, validate the amount, apply
//! the delta under the account's lock, then mint a transaction id. A
//! rejected operation touches no balance and mints no id.

use std::sync::Arc;

use mockpay_types::{
    Account, Amount, AppError, EntityStore, IdGenerator, IdKind, LedgerOperation, LedgerReceipt,
    PaymentMethodType, RepoError,
};
use rust_decimal::Decimal;

pub struct LedgerEngine<S: EntityStore> {
    store: Arc<S>,
    ids: Arc<dyn IdGenerator>,
}

impl<S: EntityStore> LedgerEngine<S> {
    pub fn new(store: Arc<S>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// balance += amount
    pub fn deposit(&self, payment_type: &str, amount: Decimal) -> Result<LedgerReceipt, AppError> {
        self.execute(LedgerOperation::Deposit, payment_type, amount, None, None)
    }

    /// balance -= amount, rejected when the balance is short.
    pub fn withdraw(&self, payment_type: &str, amount: Decimal) -> Result<LedgerReceipt, AppError> {
        self.execute(LedgerOperation::Withdraw, payment_type, amount, None, None)
    }

    /// balance += amount. `reference_id` is echoed back and never checked
    /// against an earlier debit.
    pub fn refund_to_account(
        &self,
        payment_type: &str,
        amount: Decimal,
        reference_id: String,
    ) -> Result<LedgerReceipt, AppError> {
        self.execute(
            LedgerOperation::RefundToAccount,
            payment_type,
            amount,
            None,
            Some(reference_id),
        )
    }

    /// balance -= amount for an order, rejected when the balance is short.
    pub fn process_payment(
        &self,
        payment_type: &str,
        amount: Decimal,
        order_id: String,
    ) -> Result<LedgerReceipt, AppError> {
        self.execute(
            LedgerOperation::ProcessPayment,
            payment_type,
            amount,
            Some(order_id),
            None,
        )
    }

    fn execute(
        &self,
        operation: LedgerOperation,
        token: &str,
        amount: Decimal,
        order_id: Option<String>,
        reference_id: Option<String>,
    ) -> Result<LedgerReceipt, AppError> {
        let order_id = order_id.filter(|id| !id.is_empty());
        let reference_id = reference_id.filter(|id| !id.is_empty());

        match self.apply(operation, token, amount) {
            Ok(account) => {
                let transaction_id = self.ids.new_id(IdKind::Transaction);
                tracing::info!(
                    %operation,
                    account = %account.payment_type,
                    %amount,
                    balance = %account.balance,
                    transaction_id = %transaction_id,
                    "ledger operation committed"
                );
                Ok(LedgerReceipt {
                    operation,
                    transaction_id,
                    account,
                    order_id,
                    reference_id,
                })
            }
            Err(err) => {
                tracing::warn!(%operation, account = token, %amount, error = %err, "ledger operation rejected");
                Err(err)
            }
        }
    }

    fn apply(
        &self,
        operation: LedgerOperation,
        token: &str,
        amount: Decimal,
    ) -> Result<Account, AppError> {
        let payment_type: PaymentMethodType = token.parse()?;
        if self.store.get_account(payment_type)?.is_none() {
            return Err(AppError::UnsupportedPaymentType(token.to_string()));
        }

        let amount = Amount::new(amount)?;

        self.store
            .mutate_account(payment_type, |balance| operation.apply(balance, amount))
            .map_err(|err| match err {
                RepoError::NotFound => AppError::UnsupportedPaymentType(token.to_string()),
                other => other.into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_tests::tests::SequentialIds;
    use mockpay_store::InMemoryStore;
    use rust_decimal_macros::dec;

    fn engine() -> (LedgerEngine<InMemoryStore>, Arc<InMemoryStore>, Arc<SequentialIds>) {
        let store = Arc::new(InMemoryStore::new(dec!(5000)));
        let ids = Arc::new(SequentialIds::default());
        (LedgerEngine::new(store.clone(), ids.clone()), store, ids)
    }

    fn balance(store: &InMemoryStore, payment_type: PaymentMethodType) -> Decimal {
        store.get_account(payment_type).unwrap().unwrap().balance
    }

    #[test]
    fn test_deposit_credits_account() {
        let (ledger, store, _) = engine();

        let receipt = ledger.deposit("cash", dec!(100)).unwrap();

        assert_eq!(receipt.account.balance, dec!(5100));
        assert!(receipt.transaction_id.starts_with("txn_mock_"));
        assert_eq!(balance(&store, PaymentMethodType::Cash), dec!(5100));
    }

    #[test]
    fn test_withdraw_insufficient_leaves_balance() {
        let (ledger, store, ids) = engine();

        let result = ledger.withdraw("creditcard", dec!(6000));

        assert!(matches!(result, Err(AppError::InsufficientBalance { .. })));
        assert_eq!(balance(&store, PaymentMethodType::CreditCard), dec!(5000));
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let (ledger, store, ids) = engine();

        for amount in [dec!(0), dec!(-10)] {
            assert!(matches!(ledger.deposit("cash", amount), Err(AppError::InvalidAmount)));
            assert!(matches!(ledger.withdraw("cash", amount), Err(AppError::InvalidAmount)));
            assert!(matches!(
                ledger.refund_to_account("cash", amount, "ref".into()),
                Err(AppError::InvalidAmount)
            ));
            assert!(matches!(
                ledger.process_payment("cash", amount, "ord".into()),
                Err(AppError::InvalidAmount)
            ));
        }

        assert_eq!(balance(&store, PaymentMethodType::Cash), dec!(5000));
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn test_unknown_token_is_unsupported() {
        let (ledger, _, _) = engine();
        let result = ledger.deposit("bitcoin", dec!(1));
        assert!(matches!(result, Err(AppError::UnsupportedPaymentType(t)) if t == "bitcoin"));
    }

    #[test]
    fn test_missing_account_is_unsupported_before_amount_check() {
        let store = Arc::new(InMemoryStore::with_accounts([(PaymentMethodType::Cash, dec!(1))]));
        let ledger = LedgerEngine::new(store, Arc::new(SequentialIds::default()));

        let result = ledger.deposit("creditcard", dec!(-1));
        assert!(matches!(result, Err(AppError::UnsupportedPaymentType(_))));
    }

    #[test]
    fn test_deposit_overflow_is_rejected_and_account_stays_usable() {
        let (ledger, store, ids) = engine();
        let huge = Decimal::from_i128_with_scale(70_000_000_000_000_000_000_000_000_000, 0);

        ledger.deposit("cash", huge).unwrap();
        let before = balance(&store, PaymentMethodType::Cash);
        let issued = ids.issued();

        let result = ledger.deposit("cash", huge);
        assert!(matches!(result, Err(AppError::BadRequest(ref msg)) if msg == "Balance overflow"));
        assert_eq!(balance(&store, PaymentMethodType::Cash), before);
        assert_eq!(ids.issued(), issued);

        let receipt = ledger.withdraw("cash", huge).unwrap();
        assert_eq!(receipt.account.balance, dec!(5000));
        assert!(ledger.deposit("cash", dec!(1)).is_ok());
        assert_eq!(balance(&store, PaymentMethodType::Cash), dec!(5001));
    }

    #[test]
    fn test_refund_to_account_echoes_reference() {
        let (ledger, _, _) = engine();

        let receipt = ledger
            .refund_to_account("meowth-wallet", dec!(25.50), "txn_mock_000001".into())
            .unwrap();

        assert_eq!(receipt.account.balance, dec!(5025.50));
        assert_eq!(receipt.reference_id.as_deref(), Some("txn_mock_000001"));
        assert_eq!(receipt.operation, LedgerOperation::RefundToAccount);
    }

    #[test]
    fn test_process_payment_debits_and_echoes_order() {
        let (ledger, _, _) = engine();

        let receipt = ledger.process_payment("cash", dec!(200), "ord_1".into()).unwrap();

        assert_eq!(receipt.account.balance, dec!(4800));
        assert_eq!(receipt.order_id.as_deref(), Some("ord_1"));
    }

    #[test]
    fn test_operations_on_distinct_accounts_are_independent() {
        let (ledger, store, _) = engine();

        ledger.withdraw("cash", dec!(5000)).unwrap();
        ledger.deposit("mobilebanking", dec!(1)).unwrap();

        assert_eq!(balance(&store, PaymentMethodType::Cash), dec!(0));
        assert_eq!(balance(&store, PaymentMethodType::MobileBanking), dec!(5001));
        assert_eq!(balance(&store, PaymentMethodType::CreditCard), dec!(5000));
    }
}
