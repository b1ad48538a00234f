// src/services/checkout.rs

//! Checkout flows: cash on delivery and hosted payment sessions.

use crate::errors::{AppError, Result};
use crate::models::CartLine;
use crate::services::cart;
use crate::services::payment::{CheckoutSession, PaymentGateway, SessionLineItem};
use sqlx::SqlitePool;
use tracing::{info, instrument};
use uuid::Uuid;

/// Converts cart lines to gateway line items.
///
/// Prices are kept in major units in the catalog; the gateway wants
/// minor units, so the amount is scaled by 100 and truncated toward
/// zero.
pub fn build_line_items(lines: &[CartLine], currency: &str) -> Vec<SessionLineItem> {
  lines
    .iter()
    .map(|line| SessionLineItem {
      name: line.name.clone(),
      currency: currency.to_string(),
      unit_amount: (line.price * 100.0) as i64,
      quantity: line.quantity,
    })
    .collect()
}

/// Creates a hosted checkout session for the user's current cart.
///
/// Fails with `AppError::EmptyCart` when there is nothing to pay for.
/// The cart is left untouched; it only empties once the shopper comes
/// back through the success URL.
#[instrument(name = "checkout::create_checkout_session", skip(pool, gateway), err(Display))]
pub async fn create_checkout_session(
  pool: &SqlitePool,
  gateway: &dyn PaymentGateway,
  currency: &str,
  user_id: Uuid,
  success_url: &str,
  cancel_url: &str,
) -> Result<CheckoutSession> {
  let lines = cart::lines(pool, user_id).await?;
  if lines.is_empty() {
    return Err(AppError::EmptyCart);
  }

  let line_items = build_line_items(&lines, currency);
  let session = gateway.create_session(&line_items, success_url, cancel_url).await?;
  info!(session_id = %session.id, lines = lines.len(), "Hosted checkout session created.");
  Ok(session)
}

/// Places a cash-on-delivery order: the cart is emptied and the order
/// is considered placed. An empty cart still "succeeds" and stays
/// empty.
#[instrument(name = "checkout::cash_on_delivery", skip(pool), err(Display))]
pub async fn cash_on_delivery(pool: &SqlitePool, user_id: Uuid) -> Result<()> {
  cart::clear(pool, user_id).await?;
  info!(%user_id, "Cash-on-delivery order placed.");
  Ok(())
}

/// Handles the shopper returning from the provider's success URL.
///
/// The return itself is the only signal; no session lookup or payment
/// verification happens before the cart is emptied.
#[instrument(name = "checkout::complete_success", skip(pool), err(Display))]
pub async fn complete_success(pool: &SqlitePool, user_id: Uuid) -> Result<()> {
  cart::clear(pool, user_id).await?;
  info!(%user_id, "Payment success callback processed, cart emptied.");
  Ok(())
}
