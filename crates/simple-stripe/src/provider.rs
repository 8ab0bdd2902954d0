//! Payment provider abstraction.

use async_trait::async_trait;
use simple_stripe_core::{CustomerId, PaymentIntentId, PaymentMethodId};

use crate::error::StripeError;
use crate::types::{
    CustomerCreateParams, PaymentIntentConfirmParams, PaymentIntentCreateParams,
    PaymentIntentUpdateParams, PaymentMethodType, StripeCustomer, StripeList,
    StripePaymentIntent, StripePaymentMethod,
};

/// The remote calls the facade is built on.
///
/// [`crate::StripeClient`] implements this over HTTP. Implementations must be
/// safe to share between concurrent calls.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent.
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentCreateParams,
    ) -> Result<StripePaymentIntent, StripeError>;

    /// Retrieve a payment intent.
    async fn retrieve_payment_intent(
        &self,
        id: &PaymentIntentId,
    ) -> Result<StripePaymentIntent, StripeError>;

    /// Update a payment intent.
    async fn update_payment_intent(
        &self,
        id: &PaymentIntentId,
        params: &PaymentIntentUpdateParams,
    ) -> Result<StripePaymentIntent, StripeError>;

    /// Confirm a payment intent.
    async fn confirm_payment_intent(
        &self,
        id: &PaymentIntentId,
        params: &PaymentIntentConfirmParams,
    ) -> Result<StripePaymentIntent, StripeError>;

    /// Create a customer.
    async fn create_customer(
        &self,
        params: &CustomerCreateParams,
    ) -> Result<StripeCustomer, StripeError>;

    /// Retrieve a customer, deleted or not.
    async fn retrieve_customer(&self, id: &CustomerId) -> Result<StripeCustomer, StripeError>;

    /// List a customer's payment methods of one type.
    async fn list_payment_methods(
        &self,
        customer: &CustomerId,
        method_type: PaymentMethodType,
    ) -> Result<StripeList<StripePaymentMethod>, StripeError>;

    /// Detach a payment method from its customer.
    async fn detach_payment_method(
        &self,
        id: &PaymentMethodId,
    ) -> Result<StripePaymentMethod, StripeError>;
}
