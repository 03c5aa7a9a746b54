//! PaymentService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use mockpay_store::{InMemoryStore, build_store, default_initial_balance};
    use mockpay_types::{
        AppError, ConfirmPaymentIntentRequest, CreateCustomerRequest, CreatePaymentIntentRequest,
        CreateRefundRequest, DepositRequest, EntityStore, IdGenerator, IdKind, LedgerResponse,
        PaymentIntentStatus, PaymentMethodType, ProcessPaymentRequest, RefundToAccountRequest,
        WithdrawRequest,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::PaymentService;

    /// Deterministic ids for tests: `<prefix>_mock_000001`, `<prefix>_mock_000002`, ...
    #[derive(Default)]
    pub struct SequentialIds {
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Number of ids handed out so far.
        pub fn issued(&self) -> u64 {
            self.next.load(Ordering::SeqCst)
        }
    }

    impl IdGenerator for SequentialIds {
        fn new_id(&self, kind: IdKind) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            format!("{}_mock_{:06}", kind.prefix(), n)
        }

        fn new_secret(&self, intent_id: &str) -> String {
            format!("{}_secret_abc123", intent_id)
        }
    }

    fn service() -> PaymentService<InMemoryStore> {
        PaymentService::new(InMemoryStore::new(dec!(5000)), SequentialIds::default())
    }

    fn seeded_service() -> PaymentService<InMemoryStore> {
        let store = build_store(default_initial_balance(), true).unwrap();
        PaymentService::new(store, SequentialIds::default())
    }

    fn intent_request(amount: u64) -> CreatePaymentIntentRequest {
        CreatePaymentIntentRequest {
            amount,
            currency: "thb".to_string(),
            payment_method: "pm_mock_visa".to_string(),
            description: "Food delivery payment".to_string(),
        }
    }

    #[test]
    fn test_create_and_retrieve_customer() {
        let service = service();

        let customer = service
            .create_customer(CreateCustomerRequest {
                name: "Ruff".to_string(),
                email: "ruff@example.com".to_string(),
            })
            .unwrap();

        assert_eq!(customer.id, "cus_mock_000001");
        assert_eq!(customer.object, "customer");
        assert!(customer.created > 0);
        assert_eq!(service.retrieve_customer(&customer.id).unwrap(), customer);
    }

    #[test]
    fn test_retrieve_unknown_customer() {
        let service = service();
        let result = service.retrieve_customer("cus_mock_12345");
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_fixture_customer_is_retrievable() {
        let service = seeded_service();
        let customer = service.retrieve_customer("cus_mock_12345").unwrap();
        assert_eq!(customer.name, "Ruff");
    }

    #[test]
    fn test_intent_confirmation_scenario() {
        let service = service();

        let intent = service.create_payment_intent(intent_request(1200)).unwrap();
        assert_eq!(intent.status, PaymentIntentStatus::RequiresConfirmation);

        let (intent, charges) = service
            .confirm_payment_intent(ConfirmPaymentIntentRequest { id: intent.id })
            .unwrap();

        assert_eq!(intent.status, PaymentIntentStatus::Succeeded);
        assert_eq!(charges.data.len(), 1);
        assert_eq!(charges.data[0].amount, 1200);
        assert_eq!(charges.data[0].payment_method, "pm_mock_visa");
    }

    #[test]
    fn test_confirm_unknown_intent_creates_no_charge() {
        let service = service();

        let result = service.confirm_payment_intent(ConfirmPaymentIntentRequest {
            id: "pi_mock_404".to_string(),
        });

        assert!(matches!(result, Err(AppError::NotFound(_))));
        // No id was minted, so no charge id can exist.
        assert!(service.store().get_charge("ch_mock_000001").unwrap().is_none());
    }

    #[test]
    fn test_confirm_fixture_intent() {
        let service = seeded_service();

        let (intent, charges) = service
            .confirm_payment_intent(ConfirmPaymentIntentRequest {
                id: "pi_mock_98765".to_string(),
            })
            .unwrap();

        assert_eq!(intent.status, PaymentIntentStatus::Succeeded);
        assert_eq!(charges.data[0].amount, 1200);
        assert_eq!(charges.data[0].currency, "thb");
    }

    #[test]
    fn test_refund_record_uses_intent_currency() {
        let service = service();
        let intent = service
            .create_payment_intent(CreatePaymentIntentRequest {
                currency: "usd".to_string(),
                ..intent_request(1000)
            })
            .unwrap();

        let refund = service
            .create_refund(CreateRefundRequest {
                payment_intent: intent.id.clone(),
                amount: 400,
            })
            .unwrap();

        assert_eq!(refund.currency, "usd");
        assert_eq!(refund.payment_intent, intent.id);
        assert_eq!(refund.object, "refund");
    }

    #[test]
    fn test_refund_record_for_unknown_intent_is_accepted() {
        let service = service();

        let refund = service
            .create_refund(CreateRefundRequest {
                payment_intent: "pi_mock_nowhere".to_string(),
                amount: 999_999,
            })
            .unwrap();

        assert_eq!(refund.currency, "thb");
        assert_eq!(refund.amount, 999_999);
        // Record keeping only: no ledger account moved.
        for account in service.list_accounts().unwrap() {
            assert_eq!(account.balance, dec!(5000));
        }
    }

    #[test]
    fn test_get_account_scenario() {
        let service = service();

        let account = service.get_account("creditcard").unwrap();
        assert_eq!(account.balance, dec!(5000));

        let result = service.withdraw(WithdrawRequest {
            payment_type: "creditcard".to_string(),
            amount: dec!(6000),
        });
        let err = result.unwrap_err();
        assert_eq!(LedgerResponse::rejected(err.to_string()).message, "Insufficient balance");

        assert_eq!(service.get_account("creditcard").unwrap().balance, dec!(5000));
    }

    #[test]
    fn test_get_unknown_account_is_not_found() {
        let service = service();
        assert!(matches!(service.get_account("paypal"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_process_payment_scenario() {
        let service = service();

        let receipt = service
            .process_payment(ProcessPaymentRequest {
                payment_type: "cash".to_string(),
                amount: dec!(200),
                order_id: "ord_1".to_string(),
            })
            .unwrap();

        let response = LedgerResponse::from(receipt);
        assert!(response.success);
        assert_eq!(response.order_id.as_deref(), Some("ord_1"));
        assert_eq!(response.account.unwrap().balance, dec!(4800));
    }

    #[test]
    fn test_refund_to_account_credits_ledger() {
        let service = service();

        let receipt = service
            .refund_to_account(RefundToAccountRequest {
                payment_type: "meowth-wallet".to_string(),
                amount: dec!(150),
                reference_id: "ord_1".to_string(),
            })
            .unwrap();

        assert_eq!(receipt.account.balance, dec!(5150));
        assert_eq!(receipt.account.payment_type, PaymentMethodType::MeowthWallet);
    }

    #[test]
    fn test_balance_never_negative_after_mixed_sequence() {
        let service = service();
        let amounts = [dec!(700), dec!(3000), dec!(1500), dec!(2000), dec!(0.5), dec!(4000)];

        for (i, amount) in amounts.into_iter().enumerate() {
            let token = "mobilebanking".to_string();
            let _ = if i % 2 == 0 {
                service.withdraw(WithdrawRequest { payment_type: token, amount })
            } else {
                service.process_payment(ProcessPaymentRequest {
                    payment_type: token,
                    amount,
                    order_id: format!("ord_{}", i),
                })
            };
            assert!(service.get_account("mobilebanking").unwrap().balance >= Decimal::ZERO);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_deposits_are_serializable() {
        let service = Arc::new(service());
        let n = 200;

        let handles: Vec<_> = (0..n)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .deposit(DepositRequest {
                            payment_type: "cash".to_string(),
                            amount: dec!(100),
                        })
                        .map(|r| r.transaction_id)
                })
            })
            .collect();

        let mut transaction_ids = std::collections::HashSet::new();
        for handle in handles {
            transaction_ids.insert(handle.await.unwrap().unwrap());
        }

        assert_eq!(transaction_ids.len(), n);
        let cash = service.get_account("cash").unwrap();
        assert_eq!(cash.balance, dec!(5000) + dec!(100) * Decimal::from(n));
    }
}
