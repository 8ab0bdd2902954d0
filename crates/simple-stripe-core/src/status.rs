//! Payment intent status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of payment intent states.
///
/// The provider reports status as free text. [`PaymentIntentStatus::from_provider`]
/// is total: any string outside the known set maps to [`PaymentIntentStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentIntentStatus {
    /// Waiting for a payment method to be attached.
    RequiresPaymentMethod,
    /// Payment method attached, waiting for confirmation.
    RequiresConfirmation,
    /// Customer action needed (3D Secure, redirect).
    RequiresAction,
    /// Payment is being processed.
    Processing,
    /// Authorized, waiting for capture.
    RequiresCapture,
    /// Canceled by the merchant or the provider.
    Cancelled,
    /// Funds collected.
    Succeeded,
    /// Any status this library does not know about.
    Unknown,
}

impl PaymentIntentStatus {
    /// Map a provider status string to a status.
    #[must_use]
    pub fn from_provider(status: &str) -> Self {
        match status {
            "requires_payment_method" => Self::RequiresPaymentMethod,
            "requires_confirmation" => Self::RequiresConfirmation,
            "requires_action" => Self::RequiresAction,
            "processing" => Self::Processing,
            "requires_capture" => Self::RequiresCapture,
            "canceled" => Self::Cancelled,
            "succeeded" => Self::Succeeded,
            _ => Self::Unknown,
        }
    }

    /// The status name as serialized.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RequiresPaymentMethod => "REQUIRES_PAYMENT_METHOD",
            Self::RequiresConfirmation => "REQUIRES_CONFIRMATION",
            Self::RequiresAction => "REQUIRES_ACTION",
            Self::Processing => "PROCESSING",
            Self::RequiresCapture => "REQUIRES_CAPTURE",
            Self::Cancelled => "CANCELLED",
            Self::Succeeded => "SUCCEEDED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl From<&str> for PaymentIntentStatus {
    fn from(status: &str) -> Self {
        Self::from_provider(status)
    }
}

impl fmt::Display for PaymentIntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
