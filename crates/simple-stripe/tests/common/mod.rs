//! In-memory payment provider shared by the facade tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use simple_stripe::{
    CustomerCreateParams, CustomerId, PaymentIntentConfirmParams, PaymentIntentCreateParams,
    PaymentIntentId, PaymentIntentUpdateParams, PaymentMethodId, PaymentMethodType,
    PaymentProvider, StripeCustomer, StripeError, StripeList, StripePaymentIntent,
    StripePaymentMethod,
};

/// A recorded provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateIntent(PaymentIntentCreateParams),
    RetrieveIntent(String),
    UpdateIntent(String, Option<String>),
    ConfirmIntent(String, Option<String>),
    CreateCustomer(CustomerCreateParams),
    RetrieveCustomer(String),
    ListMethods(String),
    Detach(String),
}

/// Provider double with canned responses and a call log.
#[derive(Default)]
pub struct MockProvider {
    pub intents: Mutex<HashMap<String, StripePaymentIntent>>,
    pub customers: HashMap<String, StripeCustomer>,
    pub cards: Vec<StripePaymentMethod>,
    pub create_error: Mutex<Option<StripeError>>,
    pub confirm_error: Mutex<Option<StripeError>>,
    pub failing_detach: HashSet<String>,
    pub calls: Mutex<Vec<Call>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_intent(self, intent: StripePaymentIntent) -> Self {
        self.intents
            .lock()
            .unwrap()
            .insert(intent.id.clone(), intent);
        self
    }

    pub fn with_customer(mut self, customer: StripeCustomer) -> Self {
        self.customers.insert(customer.id.clone(), customer);
        self
    }

    pub fn with_cards(mut self, cards: Vec<StripePaymentMethod>) -> Self {
        self.cards = cards;
        self
    }

    pub fn failing_create(self, error: StripeError) -> Self {
        *self.create_error.lock().unwrap() = Some(error);
        self
    }

    pub fn failing_confirm(self, error: StripeError) -> Self {
        *self.confirm_error.lock().unwrap() = Some(error);
        self
    }

    pub fn failing_detach(mut self, id: &str) -> Self {
        self.failing_detach.insert(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn detached(&self) -> Vec<String> {
        let mut detached: Vec<String> = self
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Detach(id) => Some(id),
                _ => None,
            })
            .collect();
        detached.sort();
        detached
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn intent(&self, id: &str) -> Result<StripePaymentIntent, StripeError> {
        self.intents
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StripeError::NotFound {
                message: format!("No such payment_intent: '{id}'"),
            })
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentCreateParams,
    ) -> Result<StripePaymentIntent, StripeError> {
        self.record(Call::CreateIntent(params.clone()));
        if let Some(error) = self.create_error.lock().unwrap().take() {
            return Err(error);
        }

        let status = if params.confirm == Some(true) {
            "succeeded"
        } else {
            "requires_payment_method"
        };
        let mut intent = payment_intent("pi_new", status, params.amount);
        intent.currency.clone_from(&params.currency);
        intent.customer = params.customer.as_ref().map(ToString::to_string);
        intent.payment_method = params.payment_method.as_ref().map(ToString::to_string);
        Ok(intent)
    }

    async fn retrieve_payment_intent(
        &self,
        id: &PaymentIntentId,
    ) -> Result<StripePaymentIntent, StripeError> {
        self.record(Call::RetrieveIntent(id.to_string()));
        self.intent(id.as_str())
    }

    async fn update_payment_intent(
        &self,
        id: &PaymentIntentId,
        params: &PaymentIntentUpdateParams,
    ) -> Result<StripePaymentIntent, StripeError> {
        self.record(Call::UpdateIntent(
            id.to_string(),
            params.payment_method.as_ref().map(ToString::to_string),
        ));
        let mut intents = self.intents.lock().unwrap();
        let intent = intents.get_mut(id.as_str()).ok_or_else(|| StripeError::NotFound {
            message: format!("No such payment_intent: '{id}'"),
        })?;
        intent.payment_method = params.payment_method.as_ref().map(ToString::to_string);
        intent.status = "requires_confirmation".into();
        Ok(intent.clone())
    }

    async fn confirm_payment_intent(
        &self,
        id: &PaymentIntentId,
        params: &PaymentIntentConfirmParams,
    ) -> Result<StripePaymentIntent, StripeError> {
        self.record(Call::ConfirmIntent(
            id.to_string(),
            params.payment_method.as_ref().map(ToString::to_string),
        ));
        if let Some(error) = self.confirm_error.lock().unwrap().take() {
            return Err(error);
        }
        let mut intents = self.intents.lock().unwrap();
        let intent = intents.get_mut(id.as_str()).ok_or_else(|| StripeError::NotFound {
            message: format!("No such payment_intent: '{id}'"),
        })?;
        intent.status = "succeeded".into();
        intent.amount_received = intent.amount;
        Ok(intent.clone())
    }

    async fn create_customer(
        &self,
        params: &CustomerCreateParams,
    ) -> Result<StripeCustomer, StripeError> {
        self.record(Call::CreateCustomer(params.clone()));
        Ok(customer("cus_new", 1_700_000_000, params.description.as_deref()))
    }

    async fn retrieve_customer(&self, id: &CustomerId) -> Result<StripeCustomer, StripeError> {
        self.record(Call::RetrieveCustomer(id.to_string()));
        self.customers
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StripeError::NotFound {
                message: format!("No such customer: '{id}'"),
            })
    }

    async fn list_payment_methods(
        &self,
        customer: &CustomerId,
        method_type: PaymentMethodType,
    ) -> Result<StripeList<StripePaymentMethod>, StripeError> {
        assert_eq!(method_type, PaymentMethodType::Card);
        self.record(Call::ListMethods(customer.to_string()));
        Ok(StripeList {
            data: self.cards.clone(),
            has_more: false,
            url: Some("/v1/payment_methods".into()),
        })
    }

    async fn detach_payment_method(
        &self,
        id: &PaymentMethodId,
    ) -> Result<StripePaymentMethod, StripeError> {
        self.record(Call::Detach(id.to_string()));
        if self.failing_detach.contains(id.as_str()) {
            return Err(StripeError::Api {
                status: 500,
                error_type: "api_error".into(),
                message: "Something went wrong".into(),
                code: None,
            });
        }
        self.cards
            .iter()
            .find(|card| card.id == id.as_str())
            .cloned()
            .ok_or_else(|| StripeError::NotFound {
                message: format!("No such PaymentMethod: '{id}'"),
            })
    }
}

/// A payment intent in the given state.
pub fn payment_intent(id: &str, status: &str, amount: i64) -> StripePaymentIntent {
    serde_json::from_value(json!({
        "id": id,
        "object": "payment_intent",
        "amount": amount,
        "amount_received": 0,
        "currency": "eur",
        "status": status,
        "client_secret": format!("{id}_secret_test"),
        "created": 1_600_000_000
    }))
    .expect("valid payment intent")
}

/// An active customer.
pub fn customer(id: &str, created: i64, description: Option<&str>) -> StripeCustomer {
    serde_json::from_value(json!({
        "id": id,
        "object": "customer",
        "created": created,
        "description": description,
        "metadata": {}
    }))
    .expect("valid customer")
}

/// A deleted customer.
pub fn deleted_customer(id: &str) -> StripeCustomer {
    serde_json::from_value(json!({ "id": id, "object": "customer", "deleted": true }))
        .expect("valid deleted customer")
}

/// A saved card.
pub fn card(id: &str, fingerprint: &str, created: i64) -> StripePaymentMethod {
    serde_json::from_value(json!({
        "id": id,
        "object": "payment_method",
        "type": "card",
        "created": created,
        "customer": "cus_1",
        "card": {
            "brand": "visa",
            "exp_month": 12,
            "exp_year": 2030,
            "last4": "4242",
            "fingerprint": fingerprint
        }
    }))
    .expect("valid payment method")
}
