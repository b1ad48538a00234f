// src/main.rs

use tienda::config::{AppConfig, PaymentProvider};
use tienda::services::payment::{MockPaymentGateway, PaymentGateway, StripeCheckoutGateway};
use tienda::state::AppState;
use tienda::{db, web as app_web};

use actix_web::{web as actix_data, App, HttpServer};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront server...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  // Initialize Database Pool
  let db_pool = match SqlitePool::connect(&app_config.database_url).await {
    Ok(pool) => {
      tracing::info!("Successfully connected to the database.");
      pool
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      panic!("Database connection error: {}", e);
    }
  };

  if let Err(e) = db::init_schema(&db_pool).await {
    tracing::error!(error = %e, "Failed to initialize database schema.");
    panic!("Schema initialization error: {}", e);
  }

  // Seed database if configured
  if app_config.seed_db {
    if let Err(e) = db::seed_demo_catalog(&db_pool).await {
      tracing::error!(error = %e, "Failed to seed demo catalog.");
    }
  }

  // Select the payment gateway implementation
  let payments: Arc<dyn PaymentGateway> = match app_config.payment_provider {
    PaymentProvider::Mock => {
      tracing::info!("Using the in-process mock payment gateway.");
      Arc::new(MockPaymentGateway::new())
    }
    PaymentProvider::Stripe => {
      // Config loading already rejected stripe without a key.
      let secret_key = app_config.stripe_secret_key.clone().unwrap_or_default();
      tracing::info!(api_base = %app_config.stripe_api_base, "Using the hosted-checkout payment gateway.");
      Arc::new(StripeCheckoutGateway::new(app_config.stripe_api_base.clone(), secret_key))
    }
  };

  // Create AppState
  let app_state = AppState::new(db_pool.clone(), app_config.clone(), payments);

  // Configure and Start Actix Web Server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Request spans
      .wrap(app_web::SecurityHeaders) // Outermost: every response leaves hardened
      .configure(app_web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
