//! Payment Application Service
//!
//! The single entry point transport adapters call. Customer and refund
//! record keeping live here; balance and intent logic are delegated to the
//! engines. Contains NO transport logic.

use std::sync::Arc;

use chrono::Utc;
use mockpay_types::{
    Account, AppError, Charges, ConfirmPaymentIntentRequest, CreateCustomerRequest,
    CreatePaymentIntentRequest, CreateRefundRequest, Customer, DepositRequest, EntityStore,
    IdGenerator, IdKind, LedgerReceipt, PaymentIntent, PaymentMethodType, ProcessPaymentRequest,
    Refund, RefundToAccountRequest, WithdrawRequest,
};

use crate::ledger::LedgerEngine;
use crate::lifecycle::IntentLifecycle;

/// Application service for the mock payment provider.
///
/// Generic over `S: EntityStore` - the store adapter is injected at
/// construction and shared by both engines. Build one per process (or
/// per test) and share it behind an `Arc`.
pub struct PaymentService<S: EntityStore> {
    store: Arc<S>,
    ids: Arc<dyn IdGenerator>,
    ledger: LedgerEngine<S>,
    intents: IntentLifecycle<S>,
}

impl<S: EntityStore> PaymentService<S> {
    /// Creates a new service over the given store and id generator.
    pub fn new(store: S, ids: impl IdGenerator) -> Self {
        let store = Arc::new(store);
        let ids: Arc<dyn IdGenerator> = Arc::new(ids);
        Self {
            ledger: LedgerEngine::new(store.clone(), ids.clone()),
            intents: IntentLifecycle::new(store.clone(), ids.clone()),
            store,
            ids,
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Customers
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn create_customer(&self, req: CreateCustomerRequest) -> Result<Customer, AppError> {
        tracing::info!(name = %req.name, email = %req.email, "CreateCustomer");

        let customer = Customer::new(
            self.ids.new_id(IdKind::Customer),
            req.name,
            req.email,
            Utc::now().timestamp(),
        );
        Ok(self.store.insert_customer(customer)?)
    }

    pub fn retrieve_customer(&self, id: &str) -> Result<Customer, AppError> {
        tracing::info!(id, "RetrieveCustomer");

        self.store
            .get_customer(id)?
            .ok_or_else(|| AppError::NotFound(format!("customer not found: {}", id)))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment intents
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn create_payment_intent(
        &self,
        req: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, AppError> {
        tracing::info!(
            amount = req.amount,
            currency = %req.currency,
            payment_method = %req.payment_method,
            "CreatePaymentIntent"
        );
        self.intents.create(req)
    }

    pub fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, AppError> {
        tracing::info!(id, "RetrievePaymentIntent");
        self.intents.retrieve(id)
    }

    pub fn confirm_payment_intent(
        &self,
        req: ConfirmPaymentIntentRequest,
    ) -> Result<(PaymentIntent, Charges), AppError> {
        tracing::info!(id = %req.id, "ConfirmPaymentIntent");
        self.intents.confirm(&req.id)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Refund records
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records a refund against an intent id.
    ///
    /// Informational only: the intent need not exist, the amount is not
    /// checked against any charge, and no ledger balance moves. Use
    /// [`Self::refund_to_account`] to move money.
    pub fn create_refund(&self, req: CreateRefundRequest) -> Result<Refund, AppError> {
        tracing::info!(payment_intent = %req.payment_intent, amount = req.amount, "CreateRefund");

        let currency = self
            .store
            .get_payment_intent(&req.payment_intent)?
            .map(|intent| intent.currency)
            .unwrap_or_else(|| Refund::DEFAULT_CURRENCY.to_string());

        let refund = Refund::new(
            self.ids.new_id(IdKind::Refund),
            req.payment_intent,
            req.amount,
            currency,
        );
        Ok(self.store.insert_refund(refund)?)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Ledger accounts
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn get_account(&self, token: &str) -> Result<Account, AppError> {
        tracing::info!(account = token, "GetAccount");

        let not_found = || AppError::NotFound(format!("account not found: {}", token));
        let payment_type: PaymentMethodType = token.parse().map_err(|_| not_found())?;
        self.store.get_account(payment_type)?.ok_or_else(not_found)
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.store.list_accounts()?)
    }

    pub fn deposit(&self, req: DepositRequest) -> Result<LedgerReceipt, AppError> {
        tracing::info!(account = %req.payment_type, amount = %req.amount, "Deposit");
        self.ledger.deposit(&req.payment_type, req.amount)
    }

    pub fn withdraw(&self, req: WithdrawRequest) -> Result<LedgerReceipt, AppError> {
        tracing::info!(account = %req.payment_type, amount = %req.amount, "Withdraw");
        self.ledger.withdraw(&req.payment_type, req.amount)
    }

    pub fn refund_to_account(&self, req: RefundToAccountRequest) -> Result<LedgerReceipt, AppError> {
        tracing::info!(
            account = %req.payment_type,
            amount = %req.amount,
            reference_id = %req.reference_id,
            "RefundToAccount"
        );
        self.ledger
            .refund_to_account(&req.payment_type, req.amount, req.reference_id)
    }

    pub fn process_payment(&self, req: ProcessPaymentRequest) -> Result<LedgerReceipt, AppError> {
        tracing::info!(
            account = %req.payment_type,
            amount = %req.amount,
            order_id = %req.order_id,
            "ProcessPayment"
        );
        self.ledger
            .process_payment(&req.payment_type, req.amount, req.order_id)
    }
}
