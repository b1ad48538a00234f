// src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::cart;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;
use crate::web::flash::redirect_with_flash;

#[instrument(name = "handler::cart_detail", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn cart_detail_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let lines = cart::lines(&app_state.db_pool, auth_user.user_id).await?;
  let total = cart::total(&lines);

  let cart_items: Vec<serde_json::Value> = lines
    .iter()
    .map(|line| {
      json!({
          "product_id": line.product_id,
          "name": line.name,
          "price": line.price,
          "quantity": line.quantity,
          "line_total": line.line_total()
      })
    })
    .collect();

  Ok(HttpResponse::Ok().json(json!({
      "cart_items": cart_items,
      "total": total
  })))
}

/// Browser-driven add: one click adds one unit, then back to the shop.
#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, auth_user, path),
    fields(user_id = %auth_user.user_id, product_id = %path.as_ref())
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  cart::add_item(&app_state.db_pool, auth_user.user_id, product_id).await?;

  info!("Product {} added to cart of user {}.", product_id, auth_user.user_id);
  Ok(redirect_with_flash("/", "Producto añadido al carrito."))
}
