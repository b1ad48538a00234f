// src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::services::checkout;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;
use crate::web::flash::redirect_with_flash;

#[instrument(name = "handler::checkout_cod", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn cod_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  checkout::cash_on_delivery(&app_state.db_pool, auth_user.user_id).await?;
  Ok(redirect_with_flash(
    "/",
    "Pedido realizado correctamente. Pagarás al recibir.",
  ))
}

/// Creates the hosted payment session for the current cart.
///
/// Answers `{"id": …}` on success. Empty carts and provider failures
/// answer 200 with an `{"error": …}` body the storefront script shows
/// inline; everything else goes through the usual error mapping.
#[instrument(name = "handler::checkout_session", skip(app_state, auth_user, req), fields(user_id = %auth_user.user_id))]
pub async fn create_session_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req: HttpRequest,
) -> Result<HttpResponse, AppError> {
  // Callback URLs are absolute, rebuilt from this request's own origin.
  let base = {
    let connection = req.connection_info();
    format!("{}://{}", connection.scheme(), connection.host())
  };
  let success_url = format!("{}/payment/success", base);
  let cancel_url = format!("{}/cart", base);

  let outcome = checkout::create_checkout_session(
    &app_state.db_pool,
    app_state.payments.as_ref(),
    &app_state.config.currency,
    auth_user.user_id,
    &success_url,
    &cancel_url,
  )
  .await;

  match outcome {
    Ok(session) => Ok(HttpResponse::Ok().json(json!({ "id": session.id }))),
    Err(AppError::EmptyCart) => Ok(HttpResponse::Ok().json(json!({ "error": AppError::EmptyCart.to_string() }))),
    Err(AppError::Gateway(message)) => {
      warn!("Payment gateway refused the session: {}", message);
      Ok(HttpResponse::Ok().json(json!({ "error": message })))
    }
    Err(other) => Err(other),
  }
}

/// The shopper came back through the provider's success URL.
#[instrument(name = "handler::payment_success", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn payment_success_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  checkout::complete_success(&app_state.db_pool, auth_user.user_id).await?;
  info!("Checkout completed for user {}.", auth_user.user_id);
  Ok(redirect_with_flash("/", "¡Pago realizado con éxito! Gracias por tu compra."))
}

/// Fallback for wrong-method hits on the checkout resources.
pub async fn method_not_allowed_handler() -> HttpResponse {
  HttpResponse::MethodNotAllowed().json(json!({ "error": "Método no permitido" }))
}
