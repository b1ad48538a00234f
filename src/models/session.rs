// src/models/session.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Server-side login session, looked up by its opaque token.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Session {
  pub token: String,
  pub user_id: Uuid,
  pub created_at: DateTime<Utc>,
}
