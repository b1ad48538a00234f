// src/web/extractors.rs

//! Request extractors shared by the protected handlers.

use crate::errors::AppError;
use crate::services::auth;
use crate::state::AppState;
use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;
use uuid::Uuid;

/// Name of the login-session cookie set by the auth handlers.
pub const SESSION_COOKIE: &str = "session_token";

/// The logged-in user behind the current request.
///
/// Resolves the session token from the `session_token` cookie or an
/// `Authorization: Bearer` header and looks it up in the sessions
/// table. Handlers taking this extractor reject anonymous requests
/// with a 401 before their body runs.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub user_id: Uuid,
  pub username: String,
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
  req
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.strip_prefix("Bearer "))
    .map(|token| token.to_string())
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let token = req
      .cookie(SESSION_COOKIE)
      .map(|cookie| cookie.value().to_string())
      .or_else(|| bearer_token(req));
    let state = req.app_data::<web::Data<AppState>>().cloned();

    Box::pin(async move {
      let token = token.ok_or_else(|| {
        warn!("AuthenticatedUser extractor: no session cookie or bearer token.");
        AppError::Auth("Debes iniciar sesión.".to_string())
      })?;
      let state = state.ok_or_else(|| AppError::Internal("Application state not configured.".to_string()))?;

      let user = auth::user_for_token(&state.db_pool, &token).await?;
      Ok(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
      })
    })
  }
}
