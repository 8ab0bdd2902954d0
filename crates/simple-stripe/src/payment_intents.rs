//! Payment intent operations.

use simple_stripe_core::{
    CustomerId, PaymentIntentDetails, PaymentIntentId, PaymentIntentStatus, PaymentMethodId,
    SimplePaymentIntent,
};

use crate::error::StripeError;
use crate::provider::PaymentProvider;
use crate::types::{
    PaymentIntentConfirmParams, PaymentIntentCreateParams, PaymentIntentUpdateParams,
    StripePaymentIntent,
};

/// Payment intent operations, borrowed from a [`crate::SimpleStripe`].
#[derive(Debug)]
pub struct PaymentIntents<'a, P> {
    provider: &'a P,
}

impl<'a, P: PaymentProvider> PaymentIntents<'a, P> {
    pub(crate) fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Create a payment intent.
    ///
    /// # Arguments
    ///
    /// * `amount` - Amount in minor currency units
    /// * `customer` - Optional customer to attach the intent to
    /// * `currency` - Currency code, `None` for euros
    ///
    /// Amount and currency are checked by Stripe, not here.
    pub async fn generate(
        &self,
        amount: i64,
        customer: Option<&CustomerId>,
        currency: Option<&str>,
    ) -> Result<SimplePaymentIntent, StripeError> {
        let mut params = PaymentIntentCreateParams::new(amount);
        params.customer = customer.cloned();
        if let Some(currency) = currency {
            params.currency = currency.to_string();
        }

        let intent = self.provider.create_payment_intent(&params).await?;
        Ok(SimplePaymentIntent::from(&intent))
    }

    /// The client secret to hand to a front end, if the intent exposes one.
    pub async fn client_secret(&self, id: &PaymentIntentId) -> Result<Option<String>, StripeError> {
        Ok(self.retrieve(id).await?.client_secret)
    }

    /// Current status of the intent.
    pub async fn status(&self, id: &PaymentIntentId) -> Result<PaymentIntentStatus, StripeError> {
        let intent = self.retrieve(id).await?;
        Ok(PaymentIntentStatus::from_provider(&intent.status))
    }

    /// Full details of the intent.
    pub async fn details(&self, id: &PaymentIntentId) -> Result<PaymentIntentDetails, StripeError> {
        self.retrieve(id).await?.to_details()
    }

    /// Attach a saved payment method to an existing intent and confirm it.
    ///
    /// The two calls are not atomic. If the confirmation fails the method
    /// stays attached and the intent unconfirmed; check [`Self::status`]
    /// before retrying.
    pub async fn pay_off_session(
        &self,
        id: &PaymentIntentId,
        payment_method: &PaymentMethodId,
    ) -> Result<SimplePaymentIntent, StripeError> {
        let update = PaymentIntentUpdateParams {
            payment_method: Some(payment_method.clone()),
        };
        self.provider.update_payment_intent(id, &update).await?;

        let confirm = PaymentIntentConfirmParams {
            payment_method: Some(payment_method.clone()),
        };
        let intent = self.provider.confirm_payment_intent(id, &confirm).await?;
        Ok(SimplePaymentIntent::from(&intent))
    }

    async fn retrieve(&self, id: &PaymentIntentId) -> Result<StripePaymentIntent, StripeError> {
        self.provider.retrieve_payment_intent(id).await
    }
}
