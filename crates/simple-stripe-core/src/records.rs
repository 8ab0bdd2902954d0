//! Simplified records returned by the facade.
//!
//! Every record is a one-shot snapshot of provider state at the time of the
//! call. Nothing here is cached or persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CustomerId, PaymentIntentId, PaymentIntentStatus, PaymentMethodId};

/// Compact view of a payment intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplePaymentIntent {
    /// Payment intent ID.
    pub id: PaymentIntentId,
    /// Mapped status.
    pub status: PaymentIntentStatus,
    /// Raw status string as reported by the provider.
    pub status_text: String,
}

impl SimplePaymentIntent {
    /// Build a record from a provider id and raw status string.
    #[must_use]
    pub fn new(id: impl Into<PaymentIntentId>, status_text: impl Into<String>) -> Self {
        let status_text = status_text.into();
        Self {
            id: id.into(),
            status: PaymentIntentStatus::from_provider(&status_text),
            status_text,
        }
    }
}

/// Full view of a payment intent at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentDetails {
    /// Id and status.
    #[serde(flatten)]
    pub intent: SimplePaymentIntent,
    /// Secret handed to a front end to finish confirmation, when exposed.
    pub client_secret: Option<String>,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Amount in minor currency units.
    pub amount: i64,
    /// Amount actually received, in minor currency units.
    pub amount_received: i64,
    /// Three-letter ISO currency code, lowercase.
    pub currency: String,
    /// Customer the intent belongs to.
    pub customer: Option<CustomerId>,
    /// Payment method attached to the intent.
    pub payment_method: Option<PaymentMethodId>,
}

impl PaymentIntentDetails {
    /// Payment intent ID.
    #[must_use]
    pub fn id(&self) -> &PaymentIntentId {
        &self.intent.id
    }

    /// Mapped status.
    #[must_use]
    pub fn status(&self) -> PaymentIntentStatus {
        self.intent.status
    }
}

/// Compact view of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleCustomer {
    /// Customer ID.
    pub id: CustomerId,
}

/// Customer details.
///
/// A deleted customer carries nothing but its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CustomerDetails {
    /// The customer was deleted on the provider side.
    Deleted {
        /// Customer ID.
        id: CustomerId,
    },
    /// A live customer.
    Active {
        /// Customer ID.
        id: CustomerId,
        /// Creation time.
        created: DateTime<Utc>,
        /// Free-form description.
        description: Option<String>,
    },
}

impl CustomerDetails {
    /// Customer ID.
    #[must_use]
    pub fn id(&self) -> &CustomerId {
        match self {
            Self::Deleted { id } | Self::Active { id, .. } => id,
        }
    }

    /// Whether the customer was deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    /// Creation time, absent for deleted customers.
    #[must_use]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Deleted { .. } => None,
            Self::Active { created, .. } => Some(*created),
        }
    }

    /// Description, absent for deleted customers.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Deleted { .. } => None,
            Self::Active { description, .. } => description.as_deref(),
        }
    }
}

/// Card expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardExpiry {
    /// Month, 1-12.
    pub month: u32,
    /// Four-digit year.
    pub year: i32,
}

/// A saved card, suitable for listing in a front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Payment method ID.
    pub id: PaymentMethodId,
    /// Card brand (`visa`, `mastercard`, ...).
    pub brand: String,
    /// Expiry date.
    pub exp: CardExpiry,
    /// Last four digits.
    pub last4: String,
}

/// Result of an off-session charge.
///
/// A card decline is an expected outcome rather than an error, so it is
/// reported here with the declined intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ChargeOutcome {
    /// The provider accepted the charge request.
    Completed {
        /// The created intent.
        intent: SimplePaymentIntent,
    },
    /// The card was declined.
    Declined {
        /// The declined intent.
        intent: SimplePaymentIntent,
        /// Provider error code (`card_declined`, `authentication_required`, ...).
        code: Option<String>,
        /// Issuer decline code (`insufficient_funds`, ...).
        decline_code: Option<String>,
        /// Human readable message from the provider.
        message: String,
    },
}

impl ChargeOutcome {
    /// The intent, whatever the outcome.
    #[must_use]
    pub fn intent(&self) -> &SimplePaymentIntent {
        match self {
            Self::Completed { intent } | Self::Declined { intent, .. } => intent,
        }
    }

    /// Whether the card was declined.
    #[must_use]
    pub const fn is_declined(&self) -> bool {
        matches!(self, Self::Declined { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_intent_maps_status_text() {
        let intent = SimplePaymentIntent::new("pi_1", "requires_capture");
        assert_eq!(intent.status, PaymentIntentStatus::RequiresCapture);
        assert_eq!(intent.status_text, "requires_capture");
    }

    #[test]
    fn deleted_customer_has_no_created_or_description() {
        let details = CustomerDetails::Deleted {
            id: CustomerId::new("cus_1"),
        };
        assert!(details.is_deleted());
        assert!(details.created().is_none());
        assert!(details.description().is_none());

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "deleted", "id": "cus_1" }));
    }

    #[test]
    fn active_customer_always_has_created() {
        let created = DateTime::from_timestamp(1_600_000_000, 0).unwrap();
        let details = CustomerDetails::Active {
            id: CustomerId::new("cus_2"),
            created,
            description: Some("VIP".into()),
        };
        assert!(!details.is_deleted());
        assert_eq!(details.created(), Some(created));
        assert_eq!(details.description(), Some("VIP"));
        assert_eq!(details.id().as_str(), "cus_2");
    }

    #[test]
    fn details_flatten_intent_fields() {
        let details = PaymentIntentDetails {
            intent: SimplePaymentIntent::new("pi_9", "succeeded"),
            client_secret: None,
            created: DateTime::from_timestamp(0, 0).unwrap(),
            amount: 1000,
            amount_received: 1000,
            currency: "eur".into(),
            customer: None,
            payment_method: None,
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["id"], "pi_9");
        assert_eq!(json["status"], "SUCCEEDED");
        assert_eq!(json["status_text"], "succeeded");
    }

    #[test]
    fn charge_outcome_exposes_intent() {
        let outcome = ChargeOutcome::Declined {
            intent: SimplePaymentIntent::new("pi_3", "requires_payment_method"),
            code: Some("card_declined".into()),
            decline_code: Some("insufficient_funds".into()),
            message: "Your card has insufficient funds.".into(),
        };
        assert!(outcome.is_declined());
        assert_eq!(outcome.intent().id.as_str(), "pi_3");
        assert_eq!(
            outcome.intent().status,
            PaymentIntentStatus::RequiresPaymentMethod
        );
    }
}
