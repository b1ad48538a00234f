// src/web/handlers/auth_handlers.rs

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::{accounts, auth};
use crate::state::AppState;
use crate::web::extractors::SESSION_COOKIE;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct RegisterRequestPayload {
  pub username: String,
  pub email: String,
  pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  pub username: String,
  pub password: String,
}

fn session_cookie(token: String) -> Cookie<'static> {
  Cookie::build(SESSION_COOKIE, token)
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .finish()
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::register",
    skip(app_state, req_payload),
    fields(req_username = %req_payload.username)
)]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<RegisterRequestPayload>,
) -> Result<HttpResponse, AppError> {
  info!("Registration attempt for username: {}", req_payload.username);

  let user = accounts::register(
    &app_state.db_pool,
    &req_payload.username,
    &req_payload.email,
    &req_payload.password,
  )
  .await?;

  // A fresh account is logged in right away.
  let token = auth::issue_session(&app_state.db_pool, user.id).await?;

  Ok(
    HttpResponse::Created()
      .cookie(session_cookie(token))
      .json(json!({
          "message": "Cuenta creada correctamente.",
          "user": { "id": user.id, "username": user.username, "email": user.email }
      })),
  )
}

#[instrument(
    name = "handler::login",
    skip(app_state, req_payload),
    fields(req_username = %req_payload.username)
)]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let (user, token) = accounts::login(&app_state.db_pool, &req_payload.username, &req_payload.password).await?;

  Ok(HttpResponse::Ok().cookie(session_cookie(token)).json(json!({
      "message": "Sesión iniciada.",
      "user": { "id": user.id, "username": user.username, "email": user.email }
  })))
}

#[instrument(name = "handler::logout", skip_all)]
pub async fn logout_handler(app_state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, AppError> {
  if let Some(cookie) = req.cookie(SESSION_COOKIE) {
    auth::revoke_session(&app_state.db_pool, cookie.value()).await?;
  }

  // Expire the cookie and send the user back to the storefront.
  let expired = Cookie::build(SESSION_COOKIE, "")
    .path("/")
    .http_only(true)
    .max_age(CookieDuration::ZERO)
    .finish();

  Ok(
    HttpResponse::Found()
      .insert_header((header::LOCATION, "/"))
      .cookie(expired)
      .finish(),
  )
}
