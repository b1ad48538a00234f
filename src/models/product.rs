// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>, // Description can be optional
  /// Unit price in major currency units (e.g. 299.99 EUR).
  pub price: f64,
  /// Shown in the storefront "Destacados" strip.
  pub featured: bool,
  /// Shown in the storefront "Promociones" strip.
  pub on_promotion: bool,
  pub created_at: DateTime<Utc>,
}
