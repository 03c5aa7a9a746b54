//! Intent Lifecycle Engine
//!
//! `requires_confirmation` -> `succeeded`, exactly once per intent.
//! Confirmation produces exactly one charge; a second confirmation is
//! rejected and produces nothing.

use std::sync::Arc;

use mockpay_types::{
    AppError, Charge, Charges, CreatePaymentIntentRequest, EntityStore, IdGenerator, IdKind,
    PaymentIntent, RepoError,
};

pub struct IntentLifecycle<S: EntityStore> {
    store: Arc<S>,
    ids: Arc<dyn IdGenerator>,
}

impl<S: EntityStore> IntentLifecycle<S> {
    pub fn new(store: Arc<S>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Creates an intent in `requires_confirmation` with a fresh id and client secret.
    pub fn create(&self, req: CreatePaymentIntentRequest) -> Result<PaymentIntent, AppError> {
        let id = self.ids.new_id(IdKind::PaymentIntent);
        let client_secret = self.ids.new_secret(&id);
        let intent = PaymentIntent::new(
            id,
            client_secret,
            req.amount,
            req.currency,
            req.payment_method,
            req.description,
        );

        let intent = self.store.insert_payment_intent(intent)?;
        tracing::debug!(id = %intent.id, amount = intent.amount, "payment intent created");
        Ok(intent)
    }

    pub fn retrieve(&self, id: &str) -> Result<PaymentIntent, AppError> {
        self.store
            .get_payment_intent(id)?
            .ok_or_else(|| not_found(id))
    }

    /// Confirms an intent and records the charge it produces.
    ///
    /// The status change and the charge insert happen under the intent's
    /// lock, so concurrent confirmations of one id yield a single charge.
    pub fn confirm(&self, id: &str) -> Result<(PaymentIntent, Charges), AppError> {
        let result = self.store.mutate_payment_intent(id, |intent| {
            intent.confirm()?;
            let charge = Charge::for_intent(self.ids.new_id(IdKind::Charge), intent);
            let charge = self.store.insert_charge(charge)?;
            Ok((intent.clone(), charge))
        });

        match result {
            Ok((intent, charge)) => {
                tracing::debug!(id = %intent.id, charge = %charge.id, "payment intent confirmed");
                Ok((intent, Charges::from(charge)))
            }
            Err(RepoError::NotFound) => Err(not_found(id)),
            Err(err) => Err(err.into()),
        }
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("payment intent not found: {}", id))
}
