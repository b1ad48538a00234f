// src/models/cart_item.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
  pub id: Uuid, // Primary key for the cart_item itself
  pub user_id: Uuid,
  pub product_id: Uuid,
  pub quantity: i64,
  pub added_at: DateTime<Utc>,
}

/// A cart row joined with its product, as shown on the cart page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartLine {
  pub product_id: Uuid,
  pub name: String,
  pub price: f64,
  pub quantity: i64,
}

impl CartLine {
  pub fn line_total(&self) -> f64 {
    self.price * self.quantity as f64
  }
}
