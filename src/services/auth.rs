// src/services/auth.rs

//! Password hashing and server-side session management.

use crate::errors::{AppError, Result};
use crate::models::User;
use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    SaltString,
  },
  Argon2,
};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// Hashes a plain-text password using Argon2.
#[instrument(name = "auth::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String> {
  if password.is_empty() {
    return Err(AppError::Validation("La contraseña no puede estar vacía.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  let argon2_hasher = Argon2::default(); // Default parameters (recommended)

  match argon2_hasher.hash_password(password.as_bytes(), &salt) {
    Ok(password_hash_obj) => Ok(password_hash_obj.to_string()),
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!("Password hashing process failed: {}", argon_err)))
    }
  }
}

/// Verifies a plain-text password against a stored Argon2 hash.
///
/// Returns `Ok(false)` on a mismatch; only malformed hashes or internal
/// Argon2 failures produce an error.
#[instrument(name = "auth::verify_password", skip(hashed_password_str, provided_password), err(Display))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool> {
  if hashed_password_str.is_empty() || provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = match PasswordHash::new(hashed_password_str) {
    Ok(ph) => ph,
    Err(parse_err) => {
      error!(error = %parse_err, "Failed to parse stored password hash string.");
      return Err(AppError::Internal(format!(
        "Invalid stored password hash format: {}",
        parse_err
      )));
    }
  };

  let argon2_verifier = Argon2::default();
  match argon2_verifier.verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: passwords do not match.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process errored.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// Creates a fresh session row for `user_id` and returns its opaque token.
#[instrument(name = "auth::issue_session", skip(pool), err(Display))]
pub async fn issue_session(pool: &SqlitePool, user_id: Uuid) -> Result<String> {
  let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
  sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
    .bind(&token)
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
  debug!(%user_id, "Session issued.");
  Ok(token)
}

/// Resolves a session token to its user, or fails with `AppError::Auth`.
#[instrument(name = "auth::user_for_token", skip_all, err(Display))]
pub async fn user_for_token(pool: &SqlitePool, token: &str) -> Result<User> {
  let user: Option<User> = sqlx::query_as(
    "SELECT u.id, u.username, u.email, u.password_hash, u.created_at
       FROM users u JOIN sessions s ON s.user_id = u.id
      WHERE s.token = ?",
  )
  .bind(token)
  .fetch_optional(pool)
  .await?;

  user.ok_or_else(|| AppError::Auth("Sesión no válida o caducada.".to_string()))
}

/// Deletes a session row. Unknown tokens are a no-op.
#[instrument(name = "auth::revoke_session", skip_all, err(Display))]
pub async fn revoke_session(pool: &SqlitePool, token: &str) -> Result<()> {
  sqlx::query("DELETE FROM sessions WHERE token = ?")
    .bind(token)
    .execute(pool)
    .await?;
  Ok(())
}
