// src/state.rs

use crate::config::AppConfig;
use crate::services::payment::PaymentGateway;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state, cloned into every worker.
#[derive(Clone)]
pub struct AppState {
  pub db_pool: SqlitePool,
  pub config: Arc<AppConfig>,
  pub payments: Arc<dyn PaymentGateway>,
}

impl AppState {
  pub fn new(db_pool: SqlitePool, config: Arc<AppConfig>, payments: Arc<dyn PaymentGateway>) -> Self {
    Self { db_pool, config, payments }
  }
}
