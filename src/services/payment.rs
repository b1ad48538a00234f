// src/services/payment.rs

//! Hosted-checkout payment gateway abstraction.
//!
//! The storefront never talks to a card network itself. It asks a
//! [`PaymentGateway`] to create a hosted checkout session and redirects
//! the shopper to the provider. `StripeCheckoutGateway` speaks the
//! Stripe `/v1/checkout/sessions` form protocol; `MockPaymentGateway`
//! keeps everything in-process for tests and local development.

use crate::errors::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

/// One priced line of a checkout session.
///
/// `unit_amount` is in minor currency units (cents), matching what
/// hosted-checkout providers expect on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionLineItem {
  pub name: String,
  pub currency: String,
  pub unit_amount: i64,
  pub quantity: i64,
}

/// A created hosted-checkout session. The `id` is handed to the
/// provider's frontend SDK to redirect the shopper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
  pub id: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
  async fn create_session(
    &self,
    line_items: &[SessionLineItem],
    success_url: &str,
    cancel_url: &str,
  ) -> Result<CheckoutSession>;
}

// ---------------------------------------------------------------------------
// Stripe-style HTTP gateway
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GatewayErrorBody {
  error: GatewayErrorDetail,
}

#[derive(Deserialize)]
struct GatewayErrorDetail {
  message: String,
}

/// Gateway speaking the Stripe hosted-checkout form protocol.
pub struct StripeCheckoutGateway {
  http: reqwest::Client,
  api_base: String,
  secret_key: String,
}

impl StripeCheckoutGateway {
  pub fn new(api_base: impl Into<String>, secret_key: impl Into<String>) -> Self {
    Self {
      http: reqwest::Client::new(),
      api_base: api_base.into(),
      secret_key: secret_key.into(),
    }
  }

  fn form_params(
    line_items: &[SessionLineItem],
    success_url: &str,
    cancel_url: &str,
  ) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = vec![
      ("mode".to_string(), "payment".to_string()),
      ("payment_method_types[0]".to_string(), "card".to_string()),
      ("success_url".to_string(), success_url.to_string()),
      ("cancel_url".to_string(), cancel_url.to_string()),
    ];
    for (i, item) in line_items.iter().enumerate() {
      params.push((format!("line_items[{}][price_data][currency]", i), item.currency.clone()));
      params.push((
        format!("line_items[{}][price_data][product_data][name]", i),
        item.name.clone(),
      ));
      params.push((
        format!("line_items[{}][price_data][unit_amount]", i),
        item.unit_amount.to_string(),
      ));
      params.push((format!("line_items[{}][quantity]", i), item.quantity.to_string()));
    }
    params
  }
}

#[async_trait]
impl PaymentGateway for StripeCheckoutGateway {
  #[instrument(name = "payment::stripe_create_session", skip_all, fields(items = line_items.len()), err(Display))]
  async fn create_session(
    &self,
    line_items: &[SessionLineItem],
    success_url: &str,
    cancel_url: &str,
  ) -> Result<CheckoutSession> {
    let url = format!("{}/v1/checkout/sessions", self.api_base);
    let params = Self::form_params(line_items, success_url, cancel_url);

    let response = self
      .http
      .post(&url)
      .bearer_auth(&self.secret_key)
      .form(&params)
      .send()
      .await
      .map_err(|e| AppError::Gateway(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
      let session: CheckoutSession = response
        .json()
        .await
        .map_err(|e| AppError::Gateway(format!("Malformed gateway response: {}", e)))?;
      info!(session_id = %session.id, "Checkout session created.");
      Ok(session)
    } else {
      // The provider's own message is surfaced to the caller unchanged.
      let message = match response.json::<GatewayErrorBody>().await {
        Ok(body) => body.error.message,
        Err(_) => format!("Gateway returned HTTP {}", status),
      };
      Err(AppError::Gateway(message))
    }
  }
}

// ---------------------------------------------------------------------------
// In-process mock gateway
// ---------------------------------------------------------------------------

/// What the mock saw for one `create_session` call.
#[derive(Debug, Clone)]
pub struct RecordedSession {
  pub line_items: Vec<SessionLineItem>,
  pub success_url: String,
  pub cancel_url: String,
}

/// Records every session it is asked to create; can be armed to fail.
pub struct MockPaymentGateway {
  fail_with: Option<String>,
  created: tokio::sync::Mutex<Vec<RecordedSession>>,
}

impl MockPaymentGateway {
  pub fn new() -> Self {
    Self {
      fail_with: None,
      created: tokio::sync::Mutex::new(Vec::new()),
    }
  }

  /// A gateway whose every call fails with `message`.
  pub fn failing(message: impl Into<String>) -> Self {
    Self {
      fail_with: Some(message.into()),
      created: tokio::sync::Mutex::new(Vec::new()),
    }
  }

  pub async fn created_sessions(&self) -> Vec<RecordedSession> {
    self.created.lock().await.clone()
  }
}

impl Default for MockPaymentGateway {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
  #[instrument(name = "payment::mock_create_session", skip_all, fields(items = line_items.len()))]
  async fn create_session(
    &self,
    line_items: &[SessionLineItem],
    success_url: &str,
    cancel_url: &str,
  ) -> Result<CheckoutSession> {
    if let Some(message) = &self.fail_with {
      return Err(AppError::Gateway(message.clone()));
    }

    tokio::time::sleep(std::time::Duration::from_millis(20)).await; // Simulate network latency

    self.created.lock().await.push(RecordedSession {
      line_items: line_items.to_vec(),
      success_url: success_url.to_string(),
      cancel_url: cancel_url.to_string(),
    });

    let session_id = format!("mock_cs_{}", Uuid::new_v4().simple());
    info!(%session_id, "Mock checkout session created.");
    Ok(CheckoutSession { id: session_id })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn mock_records_what_it_was_asked_to_create() {
    let gateway = MockPaymentGateway::new();
    let items = vec![SessionLineItem {
      name: "Lavadora EcoWash 8kg".to_string(),
      currency: "eur".to_string(),
      unit_amount: 29999,
      quantity: 2,
    }];

    let session = gateway
      .create_session(&items, "https://tienda.test/payment/success", "https://tienda.test/cart")
      .await
      .expect("mock session should be created");
    assert!(session.id.starts_with("mock_cs_"));

    let recorded = gateway.created_sessions().await;
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].line_items, items);
    assert_eq!(recorded[0].success_url, "https://tienda.test/payment/success");
  }

  #[tokio::test]
  async fn armed_mock_fails_with_its_exact_message() {
    let gateway = MockPaymentGateway::failing("Invalid API Key provided");
    let err = gateway
      .create_session(&[], "https://tienda.test/ok", "https://tienda.test/ko")
      .await
      .expect_err("armed mock must fail");
    match err {
      AppError::Gateway(m) => assert_eq!(m, "Invalid API Key provided"),
      other => panic!("unexpected error variant: {:?}", other),
    }
  }

  #[test]
  fn stripe_form_params_follow_the_indexed_layout() {
    let items = vec![
      SessionLineItem {
        name: "Lavadora".to_string(),
        currency: "eur".to_string(),
        unit_amount: 29999,
        quantity: 1,
      },
      SessionLineItem {
        name: "Horno".to_string(),
        currency: "eur".to_string(),
        unit_amount: 32900,
        quantity: 3,
      },
    ];
    let params = StripeCheckoutGateway::form_params(&items, "https://s", "https://c");

    let lookup = |k: &str| {
      params
        .iter()
        .find(|(key, _)| key == k)
        .map(|(_, v)| v.as_str())
        .unwrap_or_else(|| panic!("missing form key {}", k))
    };
    assert_eq!(lookup("mode"), "payment");
    assert_eq!(lookup("payment_method_types[0]"), "card");
    assert_eq!(lookup("line_items[0][price_data][product_data][name]"), "Lavadora");
    assert_eq!(lookup("line_items[0][price_data][unit_amount]"), "29999");
    assert_eq!(lookup("line_items[1][quantity]"), "3");
    assert_eq!(lookup("success_url"), "https://s");
  }
}
