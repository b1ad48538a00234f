// src/web/handlers/profile_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::services::accounts::{self, ProfileUpdate};
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct ProfileUpdatePayload {
  pub email: Option<String>,
  pub shipping_address: Option<String>,
  pub shipping_city: Option<String>,
  pub shipping_postal_code: Option<String>,
  pub phone: Option<String>,
}

// --- Handler Implementations ---

#[instrument(name = "handler::get_profile", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_profile_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let user = accounts::user_by_id(&app_state.db_pool, auth_user.user_id).await?;
  let profile = accounts::profile_of(&app_state.db_pool, auth_user.user_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "user": user,       // password hash is skipped by the model's serde attrs
      "profile": profile
  })))
}

#[instrument(name = "handler::update_profile", skip(app_state, auth_user, req_payload), fields(user_id = %auth_user.user_id))]
pub async fn update_profile_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<ProfileUpdatePayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();

  if let Some(email) = payload.email.as_deref() {
    accounts::update_email(&app_state.db_pool, auth_user.user_id, email).await?;
  }

  let profile = accounts::update_profile(
    &app_state.db_pool,
    auth_user.user_id,
    ProfileUpdate {
      shipping_address: payload.shipping_address,
      shipping_city: payload.shipping_city,
      shipping_postal_code: payload.shipping_postal_code,
      phone: payload.phone,
    },
  )
  .await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Perfil actualizado correctamente.",
      "profile": profile
  })))
}
