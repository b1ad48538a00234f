// src/services/catalog.rs

//! Read-side queries over the product catalog.

use crate::errors::{AppError, Result};
use crate::models::Product;
use sqlx::SqlitePool;
use tracing::instrument;
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = "id, name, description, price, featured, on_promotion, created_at";

/// Products flagged for the storefront "Destacados" strip.
#[instrument(name = "catalog::featured", skip_all, err(Display))]
pub async fn featured(pool: &SqlitePool) -> Result<Vec<Product>> {
  let products = sqlx::query_as(&format!(
    "SELECT {} FROM products WHERE featured = 1 ORDER BY created_at DESC",
    PRODUCT_COLUMNS
  ))
  .fetch_all(pool)
  .await?;
  Ok(products)
}

/// Products flagged for the storefront "Promociones" strip.
#[instrument(name = "catalog::on_promotion", skip_all, err(Display))]
pub async fn on_promotion(pool: &SqlitePool) -> Result<Vec<Product>> {
  let products = sqlx::query_as(&format!(
    "SELECT {} FROM products WHERE on_promotion = 1 ORDER BY created_at DESC",
    PRODUCT_COLUMNS
  ))
  .fetch_all(pool)
  .await?;
  Ok(products)
}

/// Fetches one product or fails with `AppError::NotFound`.
#[instrument(name = "catalog::product_by_id", skip(pool), err(Display))]
pub async fn product_by_id(pool: &SqlitePool, product_id: Uuid) -> Result<Product> {
  let product: Option<Product> = sqlx::query_as(&format!(
    "SELECT {} FROM products WHERE id = ?",
    PRODUCT_COLUMNS
  ))
  .bind(product_id)
  .fetch_optional(pool)
  .await?;

  product.ok_or_else(|| AppError::NotFound(format!("Producto {} no encontrado", product_id)))
}
