//! Entry point of the simplified API.

use crate::client::StripeClient;
use crate::config::StripeConfig;
use crate::customers::Customers;
use crate::error::StripeError;
use crate::payment_intents::PaymentIntents;
use crate::provider::PaymentProvider;

/// Simplified Stripe facade.
///
/// Holds one provider handle and exposes two groups of operations:
/// [`SimpleStripe::payment_intent`] and [`SimpleStripe::customer`]. The
/// facade keeps no state of its own, so one instance can serve concurrent
/// callers.
#[derive(Debug, Clone)]
pub struct SimpleStripe<P = StripeClient> {
    provider: P,
}

impl SimpleStripe<StripeClient> {
    /// Create a facade talking to Stripe with a secret key.
    pub fn new(secret_key: impl Into<String>) -> Result<Self, StripeError> {
        Ok(Self::with_provider(StripeClient::new(secret_key)?))
    }

    /// Create a facade from a full configuration.
    pub fn from_config(config: StripeConfig) -> Result<Self, StripeError> {
        Ok(Self::with_provider(StripeClient::with_config(config)?))
    }
}

impl<P: PaymentProvider> SimpleStripe<P> {
    /// Create a facade over any provider implementation.
    #[must_use]
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Payment intent operations.
    #[must_use]
    pub fn payment_intent(&self) -> PaymentIntents<'_, P> {
        PaymentIntents::new(&self.provider)
    }

    /// Customer operations.
    #[must_use]
    pub fn customer(&self) -> Customers<'_, P> {
        Customers::new(&self.provider)
    }

    /// The underlying provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }
}
