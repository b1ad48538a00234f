// src/services/cart.rs

//! Per-user shopping cart operations.

use crate::errors::Result;
use crate::models::{CartItem, CartLine};
use crate::services::catalog;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Adds one unit of `product_id` to the user's cart.
///
/// A first add inserts a line with quantity 1; later adds re-read the
/// line and bump its quantity by one. The product must exist, otherwise
/// this fails with `AppError::NotFound`.
#[instrument(name = "cart::add_item", skip(pool), err(Display))]
pub async fn add_item(pool: &SqlitePool, user_id: Uuid, product_id: Uuid) -> Result<()> {
  // 404 before touching the cart, like the product page would.
  catalog::product_by_id(pool, product_id).await?;

  let existing: Option<CartItem> = sqlx::query_as(
    "SELECT id, user_id, product_id, quantity, added_at
       FROM cart_items WHERE user_id = ? AND product_id = ?",
  )
  .bind(user_id)
  .bind(product_id)
  .fetch_optional(pool)
  .await?;

  match existing {
    Some(item) => {
      let bumped = item.quantity + 1;
      sqlx::query("UPDATE cart_items SET quantity = ? WHERE id = ?")
        .bind(bumped)
        .bind(item.id)
        .execute(pool)
        .await?;
      debug!(quantity = bumped, "Cart line incremented.");
    }
    None => {
      sqlx::query(
        "INSERT INTO cart_items (id, user_id, product_id, quantity, added_at)
           VALUES (?, ?, ?, 1, ?)",
      )
      .bind(Uuid::new_v4())
      .bind(user_id)
      .bind(product_id)
      .bind(Utc::now())
      .execute(pool)
      .await?;
      debug!("Cart line created.");
    }
  }

  Ok(())
}

/// The user's cart joined with product names and prices, oldest first.
#[instrument(name = "cart::lines", skip(pool), err(Display))]
pub async fn lines(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<CartLine>> {
  let lines = sqlx::query_as(
    "SELECT ci.product_id, p.name, p.price, ci.quantity
       FROM cart_items ci JOIN products p ON p.id = ci.product_id
      WHERE ci.user_id = ?
      ORDER BY ci.added_at ASC",
  )
  .bind(user_id)
  .fetch_all(pool)
  .await?;
  Ok(lines)
}

/// Sum of price times quantity across the cart.
pub fn total(lines: &[CartLine]) -> f64 {
  lines.iter().map(CartLine::line_total).sum()
}

/// Empties the user's cart. Clearing an already-empty cart succeeds.
#[instrument(name = "cart::clear", skip(pool), err(Display))]
pub async fn clear(pool: &SqlitePool, user_id: Uuid) -> Result<()> {
  let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
    .bind(user_id)
    .execute(pool)
    .await?;
  debug!(removed = result.rows_affected(), "Cart cleared.");
  Ok(())
}
