// src/models/profile.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Shipping details attached one-to-one to a user account.
///
/// Created empty at registration time; every field stays optional until
/// the user fills it in from the profile page.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
  pub user_id: Uuid,
  pub shipping_address: Option<String>,
  pub shipping_city: Option<String>,
  pub shipping_postal_code: Option<String>,
  pub phone: Option<String>,
}
