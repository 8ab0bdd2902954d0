//! Simplified Stripe facade.
//!
//! Wraps the handful of Stripe calls most applications need and reshapes
//! the verbose responses into compact records:
//!
//! - **Payment intents**: create, read client secret / status / details,
//!   attach and confirm off-session
//! - **Customers**: create, read details, list saved cards, remove
//!   duplicate cards, charge a saved card off-session
//!
//! # Example
//!
//! ```no_run
//! use simple_stripe::{CustomerId, PaymentMethodId, SimpleStripe};
//!
//! # async fn example() -> Result<(), simple_stripe::StripeError> {
//! let stripe = SimpleStripe::new("sk_test_...")?;
//!
//! let intent = stripe.payment_intent().generate(1500, None, None).await?;
//! let secret = stripe.payment_intent().client_secret(&intent.id).await?;
//!
//! let customer = CustomerId::new("cus_123");
//! stripe.customer().flush_duplicate_payment_methods(&customer).await?;
//!
//! let outcome = stripe
//!     .customer()
//!     .charge(&customer, &PaymentMethodId::new("pm_123"), 2500, Some("usd"))
//!     .await?;
//! if outcome.is_declined() {
//!     println!("declined: {}", outcome.intent().status);
//! }
//! # let _ = secret;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)] // every fallible call returns StripeError

pub mod client;
pub mod config;
pub mod customers;
pub mod error;
pub mod facade;
pub mod payment_intents;
pub mod provider;
pub mod types;

pub use client::StripeClient;
pub use config::StripeConfig;
pub use customers::Customers;
pub use error::StripeError;
pub use facade::SimpleStripe;
pub use payment_intents::PaymentIntents;
pub use provider::PaymentProvider;
pub use types::*;

pub use simple_stripe_core::{
    CardExpiry, ChargeOutcome, CustomerDetails, CustomerId, PaymentIntentDetails,
    PaymentIntentId, PaymentIntentStatus, PaymentMethod, PaymentMethodId, SimpleCustomer,
    SimplePaymentIntent,
};
