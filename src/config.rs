// src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

/// Which payment gateway implementation the server should construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentProvider {
  /// In-process mock gateway; sessions succeed without any network call.
  Mock,
  /// Hosted-checkout HTTP gateway (Stripe-style `/v1/checkout/sessions`).
  Stripe,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,

  /// ISO currency code applied to every checkout-session line item.
  pub currency: String,

  pub payment_provider: PaymentProvider,
  pub stripe_secret_key: Option<String>,
  pub stripe_api_base: String,

  /// Insert the demo catalog on startup when the products table is empty.
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL").unwrap_or_else(|_| "sqlite:tienda.db?mode=rwc".to_string());

    let currency = get_env("CURRENCY").unwrap_or_else(|_| "eur".to_string());

    let payment_provider = match get_env("PAYMENT_PROVIDER")
      .unwrap_or_else(|_| "mock".to_string())
      .to_lowercase()
      .as_str()
    {
      "mock" => PaymentProvider::Mock,
      "stripe" => PaymentProvider::Stripe,
      other => {
        return Err(AppError::Config(format!(
          "Unsupported PAYMENT_PROVIDER '{}' (expected 'mock' or 'stripe')",
          other
        )))
      }
    };

    let stripe_secret_key = get_env("STRIPE_SECRET_KEY").ok();
    if payment_provider == PaymentProvider::Stripe && stripe_secret_key.is_none() {
      return Err(AppError::Config(
        "STRIPE_SECRET_KEY is required when PAYMENT_PROVIDER=stripe".to_string(),
      ));
    }
    let stripe_api_base = get_env("STRIPE_API_BASE").unwrap_or_else(|_| "https://api.stripe.com".to_string());

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      currency,
      payment_provider,
      stripe_secret_key,
      stripe_api_base,
      seed_db,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  fn clear_env() {
    for var in [
      "SERVER_HOST",
      "SERVER_PORT",
      "DATABASE_URL",
      "CURRENCY",
      "PAYMENT_PROVIDER",
      "STRIPE_SECRET_KEY",
      "STRIPE_API_BASE",
      "SEED_DB",
    ] {
      env::remove_var(var);
    }
  }

  #[test]
  #[serial]
  fn defaults_apply_when_env_is_empty() {
    clear_env();
    let cfg = AppConfig::from_env().expect("config should load from defaults");
    assert_eq!(cfg.server_host, "127.0.0.1");
    assert_eq!(cfg.server_port, 8080);
    assert_eq!(cfg.currency, "eur");
    assert_eq!(cfg.payment_provider, PaymentProvider::Mock);
    assert!(!cfg.seed_db);
  }

  #[test]
  #[serial]
  fn stripe_provider_requires_secret_key() {
    clear_env();
    env::set_var("PAYMENT_PROVIDER", "stripe");
    let err = AppConfig::from_env().expect_err("missing key must be rejected");
    assert!(matches!(err, AppError::Config(_)));
    env::remove_var("PAYMENT_PROVIDER");
  }

  #[test]
  #[serial]
  fn unknown_provider_is_rejected() {
    clear_env();
    env::set_var("PAYMENT_PROVIDER", "paypal");
    let err = AppConfig::from_env().expect_err("unknown provider must be rejected");
    assert!(matches!(err, AppError::Config(_)));
    env::remove_var("PAYMENT_PROVIDER");
  }
}
