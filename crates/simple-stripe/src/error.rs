//! Error types for Stripe operations.

use crate::types::StripePaymentIntent;

/// Errors that can occur when talking to Stripe.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested resource does not exist.
    #[error("not found: {message}")]
    NotFound {
        /// Error message from Stripe.
        message: String,
    },

    /// The card was declined or could not be charged.
    #[error("card error: {message}")]
    Card {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Error code (`card_declined`, `authentication_required`, ...).
        code: Option<String>,
        /// Issuer decline code.
        decline_code: Option<String>,
        /// The payment intent the failure belongs to, when Stripe includes it.
        payment_intent: Option<Box<StripePaymentIntent>>,
    },

    /// Stripe API returned any other error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error type.
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A response lacked a field the projection needs.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A timestamp outside the representable range.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StripeError {
    /// Whether this is a card error.
    #[must_use]
    pub const fn is_card_error(&self) -> bool {
        matches!(self, Self::Card { .. })
    }

    /// HTTP status reported by Stripe, when the error came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::NotFound { .. } => Some(404),
            Self::Card { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Serialization(_)
            | Self::MalformedResponse(_)
            | Self::InvalidTimestamp(_)
            | Self::Configuration(_) => None,
        }
    }
}
