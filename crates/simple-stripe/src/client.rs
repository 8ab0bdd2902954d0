//! Stripe API client implementation.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder};
use simple_stripe_core::{CustomerId, PaymentIntentId, PaymentMethodId};
use std::time::Duration;

use crate::config::StripeConfig;
use crate::error::StripeError;
use crate::provider::PaymentProvider;
use crate::types::{
    CustomerCreateParams, PaymentIntentConfirmParams, PaymentIntentCreateParams,
    PaymentIntentUpdateParams, PaymentMethodType, StripeCustomer, StripeErrorResponse,
    StripeList, StripePaymentIntent, StripePaymentMethod,
};

/// Bytes left as-is in an id path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a resource id as exactly one path segment.
///
/// Dot segments are removed by URL normalization even when encoded, so they
/// cannot name a resource.
fn path_segment(id: &str) -> Result<String, StripeError> {
    if matches!(id, "" | "." | "..") {
        return Err(StripeError::NotFound {
            message: format!("No such resource: '{id}'"),
        });
    }
    Ok(utf8_percent_encode(id, PATH_SEGMENT).to_string())
}

/// Stripe API client.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    config: StripeConfig,
}

impl StripeClient {
    /// Create a new Stripe client with default settings.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Stripe secret API key (`sk_test_...` or `sk_live_...`)
    pub fn new(api_key: impl Into<String>) -> Result<Self, StripeError> {
        Self::with_config(StripeConfig::new(api_key))
    }

    /// Create a new Stripe client from a configuration.
    pub fn with_config(config: StripeConfig) -> Result<Self, StripeError> {
        if config.api_key.is_empty() {
            return Err(StripeError::Configuration("API key is empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.get(self.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(self.url(path)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .basic_auth(&self.config.api_key, Option::<&str>::None)
            .header("Stripe-Version", &self.config.api_version)
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        let Ok(stripe_error) = error_body else {
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(StripeError::NotFound {
                    message: format!("HTTP {status}"),
                });
            }
            return Err(StripeError::Api {
                status: status.as_u16(),
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
            });
        };

        let detail = stripe_error.error;
        let message = detail.message.unwrap_or_else(|| format!("HTTP {status}"));

        if detail.error_type == "card_error" {
            return Err(StripeError::Card {
                status: status.as_u16(),
                message,
                code: detail.code,
                decline_code: detail.decline_code,
                payment_intent: detail.payment_intent.map(Box::new),
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StripeError::NotFound { message });
        }

        Err(StripeError::Api {
            status: status.as_u16(),
            error_type: detail.error_type,
            message,
            code: detail.code,
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentCreateParams,
    ) -> Result<StripePaymentIntent, StripeError> {
        tracing::debug!(
            amount = params.amount,
            currency = %params.currency,
            customer = ?params.customer,
            confirm = ?params.confirm,
            "Creating Stripe payment intent"
        );

        let response = self
            .post("/payment_intents")
            .form(&params.to_form())
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn retrieve_payment_intent(
        &self,
        id: &PaymentIntentId,
    ) -> Result<StripePaymentIntent, StripeError> {
        tracing::debug!(payment_intent = %id, "Retrieving Stripe payment intent");

        let path = format!("/payment_intents/{}", path_segment(id.as_str())?);
        let response = self.get(&path).send().await?;

        self.handle_response(response).await
    }

    async fn update_payment_intent(
        &self,
        id: &PaymentIntentId,
        params: &PaymentIntentUpdateParams,
    ) -> Result<StripePaymentIntent, StripeError> {
        tracing::debug!(payment_intent = %id, "Updating Stripe payment intent");

        let response = self
            .post(&format!("/payment_intents/{}", path_segment(id.as_str())?))
            .form(&params.to_form())
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn confirm_payment_intent(
        &self,
        id: &PaymentIntentId,
        params: &PaymentIntentConfirmParams,
    ) -> Result<StripePaymentIntent, StripeError> {
        tracing::debug!(payment_intent = %id, "Confirming Stripe payment intent");

        let response = self
            .post(&format!(
                "/payment_intents/{}/confirm",
                path_segment(id.as_str())?
            ))
            .form(&params.to_form())
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn create_customer(
        &self,
        params: &CustomerCreateParams,
    ) -> Result<StripeCustomer, StripeError> {
        tracing::debug!(metadata_keys = params.metadata.len(), "Creating Stripe customer");

        let response = self
            .post("/customers")
            .form(&params.to_form())
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn retrieve_customer(&self, id: &CustomerId) -> Result<StripeCustomer, StripeError> {
        tracing::debug!(customer = %id, "Retrieving Stripe customer");

        let path = format!("/customers/{}", path_segment(id.as_str())?);
        let response = self.get(&path).send().await?;

        self.handle_response(response).await
    }

    async fn list_payment_methods(
        &self,
        customer: &CustomerId,
        method_type: PaymentMethodType,
    ) -> Result<StripeList<StripePaymentMethod>, StripeError> {
        tracing::debug!(customer = %customer, method_type = method_type.as_str(), "Listing Stripe payment methods");

        let response = self
            .get("/payment_methods")
            .query(&[("customer", customer.as_str()), ("type", method_type.as_str())])
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn detach_payment_method(
        &self,
        id: &PaymentMethodId,
    ) -> Result<StripePaymentMethod, StripeError> {
        tracing::debug!(payment_method = %id, "Detaching Stripe payment method");

        let response = self
            .post(&format!(
                "/payment_methods/{}/detach",
                path_segment(id.as_str())?
            ))
            .send()
            .await?;

        self.handle_response(response).await
    }
}
