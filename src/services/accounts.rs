// src/services/accounts.rs

//! User registration, login and shipping-profile management.

use crate::errors::{AppError, Result};
use crate::models::{Profile, User};
use crate::services::auth;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};
use uuid::Uuid;

/// New values for the shipping profile. `None` clears the field.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
  pub shipping_address: Option<String>,
  pub shipping_city: Option<String>,
  pub shipping_postal_code: Option<String>,
  pub phone: Option<String>,
}

/// Registers a new account and its empty shipping profile.
///
/// Profile creation is an explicit step of registration, so a freshly
/// registered user can always load `/profile`.
#[instrument(name = "accounts::register", skip(pool, password), err(Display))]
pub async fn register(pool: &SqlitePool, username: &str, email: &str, password: &str) -> Result<User> {
  let username = username.trim();
  if username.is_empty() {
    return Err(AppError::Validation("El nombre de usuario no puede estar vacío.".to_string()));
  }
  if !email.contains('@') {
    return Err(AppError::Validation("La dirección de correo no es válida.".to_string()));
  }

  let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
    .bind(username)
    .fetch_one(pool)
    .await?;
  if taken > 0 {
    return Err(AppError::Validation("El nombre de usuario ya está en uso.".to_string()));
  }

  let password_hash = auth::hash_password(password)?;
  let user = User {
    id: Uuid::new_v4(),
    username: username.to_string(),
    email: email.to_string(),
    password_hash,
    created_at: Utc::now(),
  };

  sqlx::query("INSERT INTO users (id, username, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)")
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .execute(pool)
    .await?;

  sqlx::query("INSERT INTO profiles (user_id) VALUES (?)")
    .bind(user.id)
    .execute(pool)
    .await?;

  info!(user_id = %user.id, "User registered.");
  Ok(user)
}

/// Verifies credentials and opens a session.
///
/// Unknown usernames and wrong passwords fail identically so the
/// response does not reveal which accounts exist.
#[instrument(name = "accounts::login", skip(pool, password), err(Display))]
pub async fn login(pool: &SqlitePool, username: &str, password: &str) -> Result<(User, String)> {
  let credentials_error = || AppError::Auth("Usuario o contraseña incorrectos.".to_string());

  let user: Option<User> =
    sqlx::query_as("SELECT id, username, email, password_hash, created_at FROM users WHERE username = ?")
      .bind(username)
      .fetch_optional(pool)
      .await?;

  let user = user.ok_or_else(credentials_error)?;
  if !auth::verify_password(&user.password_hash, password)? {
    return Err(credentials_error());
  }

  let token = auth::issue_session(pool, user.id).await?;
  info!(user_id = %user.id, "User logged in.");
  Ok((user, token))
}

/// Loads an account by id.
#[instrument(name = "accounts::user_by_id", skip(pool), err(Display))]
pub async fn user_by_id(pool: &SqlitePool, user_id: Uuid) -> Result<User> {
  let user: Option<User> =
    sqlx::query_as("SELECT id, username, email, password_hash, created_at FROM users WHERE id = ?")
      .bind(user_id)
      .fetch_optional(pool)
      .await?;
  user.ok_or_else(|| AppError::NotFound(format!("Usuario {} no encontrado", user_id)))
}

/// Loads the shipping profile for `user_id`.
#[instrument(name = "accounts::profile_of", skip(pool), err(Display))]
pub async fn profile_of(pool: &SqlitePool, user_id: Uuid) -> Result<Profile> {
  let profile: Option<Profile> = sqlx::query_as(
    "SELECT user_id, shipping_address, shipping_city, shipping_postal_code, phone
       FROM profiles WHERE user_id = ?",
  )
  .bind(user_id)
  .fetch_optional(pool)
  .await?;

  profile.ok_or_else(|| AppError::NotFound(format!("Perfil del usuario {} no encontrado", user_id)))
}

/// Changes the account email address.
#[instrument(name = "accounts::update_email", skip(pool), err(Display))]
pub async fn update_email(pool: &SqlitePool, user_id: Uuid, email: &str) -> Result<()> {
  if !email.contains('@') {
    return Err(AppError::Validation("La dirección de correo no es válida.".to_string()));
  }
  let result = sqlx::query("UPDATE users SET email = ? WHERE id = ?")
    .bind(email)
    .bind(user_id)
    .execute(pool)
    .await?;
  if result.rows_affected() == 0 {
    return Err(AppError::NotFound(format!("Usuario {} no encontrado", user_id)));
  }
  Ok(())
}

/// Overwrites the shipping profile and returns the stored row.
#[instrument(name = "accounts::update_profile", skip(pool, update), err(Display))]
pub async fn update_profile(pool: &SqlitePool, user_id: Uuid, update: ProfileUpdate) -> Result<Profile> {
  let result = sqlx::query(
    "UPDATE profiles
        SET shipping_address = ?, shipping_city = ?, shipping_postal_code = ?, phone = ?
      WHERE user_id = ?",
  )
  .bind(&update.shipping_address)
  .bind(&update.shipping_city)
  .bind(&update.shipping_postal_code)
  .bind(&update.phone)
  .bind(user_id)
  .execute(pool)
  .await?;

  if result.rows_affected() == 0 {
    return Err(AppError::NotFound(format!("Perfil del usuario {} no encontrado", user_id)));
  }

  profile_of(pool, user_id).await
}
