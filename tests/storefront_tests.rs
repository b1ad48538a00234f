// tests/storefront_tests.rs
mod common; // Reference the common module

use actix_web::http::StatusCode;
use actix_web::test;
use common::*;
use serde_json::Value;
use std::sync::Arc;
use tienda::services::payment::MockPaymentGateway;

fn names(list: &Value) -> Vec<&str> {
  list
    .as_array()
    .expect("product list")
    .iter()
    .filter_map(|p| p["name"].as_str())
    .collect()
}

#[actix_web::test]
async fn home_splits_featured_and_promotional_strips() {
  setup_tracing();
  let pool = memory_pool().await;
  seed_product(&pool, "Solo destacado", 100.0, true, false).await;
  seed_product(&pool, "Solo promoción", 50.0, false, true).await;
  seed_product(&pool, "Ambas listas", 75.0, true, true).await;
  seed_product(&pool, "Ninguna lista", 10.0, false, false).await;

  let app = test::init_service(test_app(test_state(pool, Arc::new(MockPaymentGateway::new())))).await;
  let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body: Value = test::read_body_json(resp).await;
  let featured = names(&body["featured_products"]);
  let promotional = names(&body["promotional_products"]);

  assert!(featured.contains(&"Solo destacado"));
  assert!(featured.contains(&"Ambas listas"));
  assert!(!featured.contains(&"Solo promoción"));

  assert!(promotional.contains(&"Solo promoción"));
  assert!(promotional.contains(&"Ambas listas"));
  assert!(!promotional.contains(&"Ninguna lista"));
}

#[actix_web::test]
async fn product_detail_returns_the_product() {
  setup_tracing();
  let pool = memory_pool().await;
  let product_id = seed_product(&pool, "Lavadora EcoWash 8kg", 299.99, true, false).await;

  let app = test::init_service(test_app(test_state(pool, Arc::new(MockPaymentGateway::new())))).await;
  let req = test::TestRequest::get()
    .uri(&format!("/products/{}", product_id))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["product"]["name"], "Lavadora EcoWash 8kg");
  assert_eq!(body["product"]["price"], 299.99);
}

#[actix_web::test]
async fn unknown_products_are_a_404_with_an_error_body() {
  setup_tracing();
  let pool = memory_pool().await;
  let app = test::init_service(test_app(test_state(pool, Arc::new(MockPaymentGateway::new())))).await;

  let req = test::TestRequest::get()
    .uri(&format!("/products/{}", uuid::Uuid::new_v4()))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let body: Value = test::read_body_json(resp).await;
  let message = body["error"].as_str().expect("error message");
  assert!(message.starts_with("Producto"));
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
  setup_tracing();
  let pool = memory_pool().await;
  let app = test::init_service(test_app(test_state(pool, Arc::new(MockPaymentGateway::new())))).await;

  let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn demo_catalog_seeding_is_idempotent() {
  setup_tracing();
  let pool = memory_pool().await;

  tienda::db::seed_demo_catalog(&pool).await.expect("first seed");
  let first: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
    .fetch_one(&pool)
    .await
    .expect("count");
  assert!(first > 0);

  tienda::db::seed_demo_catalog(&pool).await.expect("second seed");
  let second: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
    .fetch_one(&pool)
    .await
    .expect("count");
  assert_eq!(first, second);
}
