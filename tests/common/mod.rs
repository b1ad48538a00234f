// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web as actix_data, App};
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

use tienda::config::{AppConfig, PaymentProvider};
use tienda::services::payment::PaymentGateway;
use tienda::services::{accounts, auth};
use tienda::state::AppState;
use tienda::web::{configure_app_routes, SecurityHeaders};

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Fresh in-memory database with the full schema applied.
///
/// The pool is capped at one connection: every connection to
/// `sqlite::memory:` opens its own database, so a larger pool would
/// scatter the tables.
pub async fn memory_pool() -> SqlitePool {
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("in-memory sqlite should connect");
  tienda::db::init_schema(&pool).await.expect("schema should apply");
  pool
}

pub fn test_config() -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    database_url: "sqlite::memory:".to_string(),
    currency: "eur".to_string(),
    payment_provider: PaymentProvider::Mock,
    stripe_secret_key: None,
    stripe_api_base: "https://api.stripe.com".to_string(),
    seed_db: false,
  }
}

pub fn test_state(pool: SqlitePool, payments: Arc<dyn PaymentGateway>) -> AppState {
  AppState::new(pool, Arc::new(test_config()), payments)
}

/// The application exactly as `main` assembles it, minus the request
/// logger.
pub fn test_app(
  state: AppState,
) -> App<
  impl ServiceFactory<
    ServiceRequest,
    Config = (),
    Response = ServiceResponse<BoxBody>,
    Error = actix_web::Error,
    InitError = (),
  >,
> {
  App::new()
    .app_data(actix_data::Data::new(state))
    .wrap(SecurityHeaders)
    .configure(configure_app_routes)
}

/// Inserts a product row and returns its id.
pub async fn seed_product(pool: &SqlitePool, name: &str, price: f64, featured: bool, on_promotion: bool) -> Uuid {
  let id = Uuid::new_v4();
  sqlx::query(
    "INSERT INTO products (id, name, description, price, featured, on_promotion, created_at)
       VALUES (?, ?, NULL, ?, ?, ?, ?)",
  )
  .bind(id)
  .bind(name)
  .bind(price)
  .bind(featured)
  .bind(on_promotion)
  .bind(Utc::now())
  .execute(pool)
  .await
  .expect("product insert should succeed");
  id
}

/// Registers an account straight through the service layer and opens a
/// session for it. Returns `(user_id, session_token)`.
pub async fn registered_user(pool: &SqlitePool, username: &str) -> (Uuid, String) {
  let email = format!("{}@tienda.test", username);
  let user = accounts::register(pool, username, &email, "s3creta!")
    .await
    .expect("registration should succeed");
  let token = auth::issue_session(pool, user.id)
    .await
    .expect("session should be issued");
  (user.id, token)
}

/// `(product_id, quantity)` rows of one user's cart.
pub async fn cart_rows(pool: &SqlitePool, user_id: Uuid) -> Vec<(Uuid, i64)> {
  sqlx::query_as("SELECT product_id, quantity FROM cart_items WHERE user_id = ? ORDER BY added_at ASC")
    .bind(user_id)
    .fetch_all(pool)
    .await
    .expect("cart rows should be readable")
}
