//! Stripe API types and their projection into simplified records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use simple_stripe_core::{
    CardExpiry, CustomerDetails, CustomerId, FingerprintedCard, PaymentIntentDetails,
    PaymentMethod, PaymentMethodId, SimpleCustomer, SimplePaymentIntent, DEFAULT_CURRENCY,
};

use crate::error::StripeError;

/// Stripe `PaymentIntent` object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StripePaymentIntent {
    /// Payment intent ID.
    pub id: String,
    /// Amount in cents.
    #[serde(default)]
    pub amount: i64,
    /// Amount received in cents.
    #[serde(default)]
    pub amount_received: i64,
    /// Currency (e.g., "eur").
    #[serde(default)]
    pub currency: String,
    /// Status (`requires_payment_method`, `succeeded`, ...).
    #[serde(default)]
    pub status: String,
    /// Customer ID.
    #[serde(default)]
    pub customer: Option<String>,
    /// Attached payment method ID.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Client secret for front-end confirmation.
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<&StripePaymentIntent> for SimplePaymentIntent {
    fn from(pi: &StripePaymentIntent) -> Self {
        Self::new(pi.id.as_str(), pi.status.as_str())
    }
}

impl StripePaymentIntent {
    /// Project the full detail record.
    pub fn to_details(&self) -> Result<PaymentIntentDetails, StripeError> {
        Ok(PaymentIntentDetails {
            intent: SimplePaymentIntent::from(self),
            client_secret: self.client_secret.clone(),
            created: from_unix_seconds(self.created)?,
            amount: self.amount,
            amount_received: self.amount_received,
            currency: self.currency.clone(),
            customer: self.customer.as_deref().map(CustomerId::from),
            payment_method: self.payment_method.as_deref().map(PaymentMethodId::from),
        })
    }
}

/// Stripe customer object, live or deleted.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomer {
    /// Stripe customer ID.
    pub id: String,
    /// Set on deleted customers.
    #[serde(default)]
    pub deleted: bool,
    /// Created timestamp (Unix). Absent on deleted customers.
    #[serde(default)]
    pub created: Option<i64>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Customer email.
    #[serde(default)]
    pub email: Option<String>,
    /// Customer name.
    #[serde(default)]
    pub name: Option<String>,
    /// Metadata attached to the customer.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl From<&StripeCustomer> for SimpleCustomer {
    fn from(customer: &StripeCustomer) -> Self {
        Self {
            id: CustomerId::from(customer.id.as_str()),
        }
    }
}

impl StripeCustomer {
    /// Project the customer into its deleted or active shape.
    pub fn to_details(&self) -> Result<CustomerDetails, StripeError> {
        let id = CustomerId::from(self.id.as_str());
        if self.deleted {
            return Ok(CustomerDetails::Deleted { id });
        }

        let created = self.created.ok_or_else(|| {
            StripeError::MalformedResponse(format!("customer {} has no created timestamp", self.id))
        })?;

        Ok(CustomerDetails::Active {
            id,
            created: from_unix_seconds(created)?,
            description: self.description.clone(),
        })
    }
}

/// Stripe `PaymentMethod` object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentMethod {
    /// Payment method ID.
    pub id: String,
    /// Payment method type (`card`, `sepa_debit`, ...).
    #[serde(rename = "type", default)]
    pub method_type: String,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
    /// Customer the method is attached to.
    #[serde(default)]
    pub customer: Option<String>,
    /// Card details for card-type methods.
    #[serde(default)]
    pub card: Option<StripeCard>,
}

impl StripePaymentMethod {
    /// Project the card into a [`PaymentMethod`], `None` if no card details are present.
    #[must_use]
    pub fn to_payment_method(&self) -> Option<PaymentMethod> {
        let card = self.card.as_ref()?;
        Some(PaymentMethod {
            id: PaymentMethodId::from(self.id.as_str()),
            brand: card.brand.clone(),
            exp: CardExpiry {
                month: card.exp_month,
                year: card.exp_year,
            },
            last4: card.last4.clone(),
        })
    }
}

impl FingerprintedCard for StripePaymentMethod {
    fn fingerprint(&self) -> Option<&str> {
        self.card.as_ref()?.fingerprint.as_deref()
    }

    fn created(&self) -> i64 {
        self.created
    }
}

/// Card details of a payment method.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCard {
    /// Card brand.
    #[serde(default)]
    pub brand: String,
    /// Expiry month.
    #[serde(default)]
    pub exp_month: u32,
    /// Expiry year.
    #[serde(default)]
    pub exp_year: i32,
    /// Last four digits.
    #[serde(default)]
    pub last4: String,
    /// Fingerprint of the physical card.
    #[serde(default)]
    pub fingerprint: Option<String>,
}

/// Stripe list response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeList<T> {
    /// Data items.
    pub data: Vec<T>,
    /// Whether there are more items.
    #[serde(default)]
    pub has_more: bool,
    /// URL for the list endpoint.
    #[serde(default)]
    pub url: Option<String>,
}

/// Stripe API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    /// Error details.
    pub error: StripeErrorDetail,
}

/// Stripe error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorDetail {
    /// Error type (`card_error`, `invalid_request_error`, ...).
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    #[serde(default)]
    pub message: Option<String>,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Issuer decline code for card errors.
    #[serde(default)]
    pub decline_code: Option<String>,
    /// Parameter that caused the error.
    #[serde(default)]
    pub param: Option<String>,
    /// Payment intent involved in the failure.
    #[serde(default)]
    pub payment_intent: Option<StripePaymentIntent>,
}

/// Payment method types that can be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethodType {
    /// Card payment methods.
    Card,
}

impl PaymentMethodType {
    /// Wire name of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
        }
    }
}

/// Form parameters sent to Stripe.
pub type FormParams = Vec<(String, String)>;

/// Parameters for creating a payment intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentCreateParams {
    /// Amount in minor currency units.
    pub amount: i64,
    /// Currency code.
    pub currency: String,
    /// Customer to attach the intent to.
    pub customer: Option<CustomerId>,
    /// Payment method to use.
    pub payment_method: Option<PaymentMethodId>,
    /// Whether the customer is absent from the flow.
    pub off_session: Option<bool>,
    /// Confirm the intent immediately.
    pub confirm: Option<bool>,
}

impl PaymentIntentCreateParams {
    /// Parameters for an amount, in the default currency.
    #[must_use]
    pub fn new(amount: i64) -> Self {
        Self {
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            customer: None,
            payment_method: None,
            off_session: None,
            confirm: None,
        }
    }

    /// Encode as form parameters.
    #[must_use]
    pub fn to_form(&self) -> FormParams {
        let mut params = vec![
            ("amount".to_string(), self.amount.to_string()),
            ("currency".to_string(), self.currency.clone()),
        ];
        if let Some(customer) = &self.customer {
            params.push(("customer".into(), customer.to_string()));
        }
        if let Some(method) = &self.payment_method {
            params.push(("payment_method".into(), method.to_string()));
        }
        if let Some(off_session) = self.off_session {
            params.push(("off_session".into(), off_session.to_string()));
        }
        if let Some(confirm) = self.confirm {
            params.push(("confirm".into(), confirm.to_string()));
        }
        params
    }
}

/// Parameters for updating a payment intent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentIntentUpdateParams {
    /// Payment method to attach.
    pub payment_method: Option<PaymentMethodId>,
}

impl PaymentIntentUpdateParams {
    /// Encode as form parameters.
    #[must_use]
    pub fn to_form(&self) -> FormParams {
        self.payment_method
            .iter()
            .map(|method| ("payment_method".to_string(), method.to_string()))
            .collect()
    }
}

/// Parameters for confirming a payment intent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentIntentConfirmParams {
    /// Payment method to confirm with.
    pub payment_method: Option<PaymentMethodId>,
}

impl PaymentIntentConfirmParams {
    /// Encode as form parameters.
    #[must_use]
    pub fn to_form(&self) -> FormParams {
        self.payment_method
            .iter()
            .map(|method| ("payment_method".to_string(), method.to_string()))
            .collect()
    }
}

/// Options for creating a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerCreateParams {
    /// Customer email.
    pub email: Option<String>,
    /// Customer name.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Key-value metadata.
    pub metadata: BTreeMap<String, String>,
}

impl CustomerCreateParams {
    /// Empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the phone number.
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Encode as form parameters.
    #[must_use]
    pub fn to_form(&self) -> FormParams {
        let mut params = FormParams::new();
        let fields = [
            ("email", &self.email),
            ("name", &self.name),
            ("description", &self.description),
            ("phone", &self.phone),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                params.push((key.to_string(), value.clone()));
            }
        }
        for (key, value) in &self.metadata {
            params.push((format!("metadata[{key}]"), value.clone()));
        }
        params
    }
}

/// Convert Unix seconds into a UTC timestamp.
pub(crate) fn from_unix_seconds(seconds: i64) -> Result<DateTime<Utc>, StripeError> {
    DateTime::from_timestamp(seconds, 0).ok_or(StripeError::InvalidTimestamp(seconds))
}
