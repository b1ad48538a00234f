// src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::catalog;
use crate::state::AppState;

/// Storefront landing page data: the two curated product strips.
#[instrument(name = "handler::home", skip(app_state))]
pub async fn home_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let featured = catalog::featured(&app_state.db_pool).await?;
  let on_promotion = catalog::on_promotion(&app_state.db_pool).await?;

  info!(featured = featured.len(), on_promotion = on_promotion.len(), "Home listing served.");

  Ok(HttpResponse::Ok().json(json!({
      "featured_products": featured,
      "promotional_products": on_promotion
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let product = catalog::product_by_id(&app_state.db_pool, product_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "product": product })))
}
