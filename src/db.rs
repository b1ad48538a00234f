// src/db.rs

//! Schema bootstrap and demo-catalog seeding for the SQLite store.

use crate::errors::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Create every table the storefront needs. Safe to call repeatedly.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
  sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

  sqlx::query(
    "CREATE TABLE IF NOT EXISTS products (
        id BLOB PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        price REAL NOT NULL CHECK (price >= 0),
        featured INTEGER NOT NULL DEFAULT 0,
        on_promotion INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )",
  )
  .execute(pool)
  .await?;

  sqlx::query(
    "CREATE TABLE IF NOT EXISTS users (
        id BLOB PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
  )
  .execute(pool)
  .await?;

  sqlx::query(
    "CREATE TABLE IF NOT EXISTS profiles (
        user_id BLOB PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
        shipping_address TEXT,
        shipping_city TEXT,
        shipping_postal_code TEXT,
        phone TEXT
    )",
  )
  .execute(pool)
  .await?;

  sqlx::query(
    "CREATE TABLE IF NOT EXISTS sessions (
        token TEXT PRIMARY KEY,
        user_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at TEXT NOT NULL
    )",
  )
  .execute(pool)
  .await?;

  sqlx::query(
    "CREATE TABLE IF NOT EXISTS cart_items (
        id BLOB PRIMARY KEY,
        user_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        product_id BLOB NOT NULL REFERENCES products(id) ON DELETE CASCADE,
        quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity > 0),
        added_at TEXT NOT NULL,
        UNIQUE (user_id, product_id)
    )",
  )
  .execute(pool)
  .await?;

  sqlx::query("CREATE INDEX IF NOT EXISTS idx_cart_items_user ON cart_items(user_id)")
    .execute(pool)
    .await?;

  Ok(())
}

/// Insert the demo appliance catalog when the products table is empty.
pub async fn seed_demo_catalog(pool: &SqlitePool) -> Result<()> {
  let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products").fetch_one(pool).await?;
  if count > 0 {
    tracing::debug!("Products table already populated, skipping seed.");
    return Ok(());
  }

  // (name, description, price, featured, on_promotion)
  let catalog: [(&str, &str, f64, bool, bool); 6] = [
    (
      "Lavadora EcoWash 8kg",
      "Lavadora de carga frontal con programa rápido de 30 minutos.",
      299.99,
      true,
      false,
    ),
    (
      "Frigorífico Combi NoFrost",
      "Frigorífico combi de 330 litros con tecnología NoFrost.",
      549.00,
      true,
      true,
    ),
    (
      "Lavavajillas Silence 44dB",
      "Lavavajillas de 13 servicios con media carga.",
      389.50,
      false,
      true,
    ),
    (
      "Horno multifunción pirolítico",
      "Horno de 71 litros con limpieza pirolítica.",
      329.00,
      false,
      false,
    ),
    (
      "Microondas con grill 20L",
      "Microondas compacto con grill de cuarzo.",
      89.90,
      false,
      true,
    ),
    (
      "Televisor 4K 55 pulgadas",
      "Smart TV 4K UHD con HDR10+.",
      479.99,
      true,
      false,
    ),
  ];

  for (name, description, price, featured, on_promotion) in catalog {
    sqlx::query(
      "INSERT INTO products (id, name, description, price, featured, on_promotion, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(featured)
    .bind(on_promotion)
    .bind(Utc::now())
    .execute(pool)
    .await?;
  }

  tracing::info!(products = catalog.len(), "Demo catalog seeded.");
  Ok(())
}
