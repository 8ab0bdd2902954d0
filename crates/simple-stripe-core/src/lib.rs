//! Core types for the simple-stripe payment facade.
//!
//! This crate holds everything that does not talk to the network:
//!
//! - **Identifiers**: `PaymentIntentId`, `CustomerId`, `PaymentMethodId`
//! - **Status**: `PaymentIntentStatus` and its total mapping from provider strings
//! - **Records**: `SimplePaymentIntent`, `PaymentIntentDetails`, `SimpleCustomer`,
//!   `CustomerDetails`, `PaymentMethod`, `ChargeOutcome`
//! - **Deduplication**: the adjacent-pair duplicate card detection used by
//!   the customer flush operation
//!
//! # Amounts
//!
//! Amounts are integer minor currency units (cents for EUR/USD), stored as `i64`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dedup;
pub mod ids;
pub mod records;
pub mod status;

pub use dedup::{duplicate_card_indices, FingerprintedCard};
pub use ids::{CustomerId, PaymentIntentId, PaymentMethodId};
pub use records::{
    CardExpiry, ChargeOutcome, CustomerDetails, PaymentIntentDetails, PaymentMethod,
    SimpleCustomer, SimplePaymentIntent,
};
pub use status::PaymentIntentStatus;

/// Currency used when the caller does not pick one.
pub const DEFAULT_CURRENCY: &str = "eur";
