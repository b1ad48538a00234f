// src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// Cart was empty where the workflow requires line items. Display text is
  /// the user-facing message the checkout-session endpoint forwards as-is.
  #[error("El carrito está vacío")]
  EmptyCart,

  #[error("Payment Processing Error: {0}")]
  Payment(String),

  /// Failure reported by the remote payment provider. The inner message is
  /// forwarded verbatim to the client by the checkout-session endpoint.
  #[error("Payment Provider Error: {0}")]
  Gateway(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::EmptyCart => HttpResponse::BadRequest().json(json!({"error": self.to_string()})),
      AppError::Payment(m) => HttpResponse::PaymentRequired().json(json!({"error": m})),
      AppError::Gateway(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Payment provider error", "detail": m}))
      }
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Sqlx(_) => HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"})),
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
