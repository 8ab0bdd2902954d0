//! Customer and saved card operations.

use futures::future::join_all;
use simple_stripe_core::{
    duplicate_card_indices, ChargeOutcome, CustomerDetails, CustomerId, PaymentMethod,
    PaymentMethodId, SimpleCustomer, SimplePaymentIntent,
};

use crate::error::StripeError;
use crate::provider::PaymentProvider;
use crate::types::{
    CustomerCreateParams, PaymentIntentCreateParams, PaymentMethodType, StripePaymentMethod,
};

/// Customer operations, borrowed from a [`crate::SimpleStripe`].
#[derive(Debug)]
pub struct Customers<'a, P> {
    provider: &'a P,
}

impl<'a, P: PaymentProvider> Customers<'a, P> {
    pub(crate) fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Create a customer and return its id.
    pub async fn create(
        &self,
        params: Option<&CustomerCreateParams>,
    ) -> Result<SimpleCustomer, StripeError> {
        let default_params = CustomerCreateParams::default();
        let params = params.unwrap_or(&default_params);

        let customer = self.provider.create_customer(params).await?;
        Ok(SimpleCustomer::from(&customer))
    }

    /// Customer details, deleted or active.
    pub async fn details(&self, id: &CustomerId) -> Result<CustomerDetails, StripeError> {
        self.provider.retrieve_customer(id).await?.to_details()
    }

    /// The customer's saved cards, in provider order.
    ///
    /// Only the first page returned by Stripe is read.
    pub async fn payment_methods(&self, id: &CustomerId) -> Result<Vec<PaymentMethod>, StripeError> {
        let cards = self.cards(id).await?;

        Ok(cards
            .iter()
            .filter_map(|method| {
                let projected = method.to_payment_method();
                if projected.is_none() {
                    tracing::warn!(payment_method = %method.id, "Listed payment method has no card details");
                }
                projected
            })
            .collect())
    }

    /// Detach older duplicates of the customer's saved cards.
    ///
    /// Each card is compared with one neighbour in listing order, see
    /// [`simple_stripe_core::dedup`]. All detach calls run concurrently and
    /// are awaited; individual failures are logged and not reported.
    ///
    /// Returns the number of cards flagged as duplicates.
    pub async fn flush_duplicate_payment_methods(&self, id: &CustomerId) -> Result<usize, StripeError> {
        let cards = self.cards(id).await?;
        let flagged: Vec<PaymentMethodId> = duplicate_card_indices(&cards)
            .into_iter()
            .map(|index| PaymentMethodId::from(cards[index].id.as_str()))
            .collect();

        tracing::info!(customer = %id, flagged = flagged.len(), "Flushing duplicate payment methods");

        let results = join_all(
            flagged
                .iter()
                .map(|method| self.provider.detach_payment_method(method)),
        )
        .await;

        for (method, result) in flagged.iter().zip(results) {
            if let Err(e) = result {
                tracing::warn!(customer = %id, payment_method = %method, error = %e, "Failed to detach duplicate payment method");
            }
        }

        Ok(flagged.len())
    }

    /// Charge a saved payment method with the customer absent.
    ///
    /// A card decline is returned as [`ChargeOutcome::Declined`] carrying the
    /// declined intent. Any other failure is returned as an error.
    pub async fn charge(
        &self,
        customer: &CustomerId,
        payment_method: &PaymentMethodId,
        amount: i64,
        currency: Option<&str>,
    ) -> Result<ChargeOutcome, StripeError> {
        let mut params = PaymentIntentCreateParams::new(amount);
        params.customer = Some(customer.clone());
        params.payment_method = Some(payment_method.clone());
        params.off_session = Some(true);
        params.confirm = Some(true);
        if let Some(currency) = currency {
            params.currency = currency.to_string();
        }

        match self.provider.create_payment_intent(&params).await {
            Ok(intent) => Ok(ChargeOutcome::Completed {
                intent: SimplePaymentIntent::from(&intent),
            }),
            Err(StripeError::Card {
                message,
                code,
                decline_code,
                payment_intent: Some(intent),
                ..
            }) => {
                tracing::info!(
                    customer = %customer,
                    payment_intent = %intent.id,
                    decline_code = ?decline_code,
                    "Off-session charge declined"
                );
                Ok(ChargeOutcome::Declined {
                    intent: SimplePaymentIntent::from(intent.as_ref()),
                    code,
                    decline_code,
                    message,
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn cards(&self, id: &CustomerId) -> Result<Vec<StripePaymentMethod>, StripeError> {
        let list = self
            .provider
            .list_payment_methods(id, PaymentMethodType::Card)
            .await?;
        Ok(list.data)
    }
}
