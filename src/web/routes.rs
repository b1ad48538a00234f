// src/web/routes.rs

use actix_web::web;

// Liveness probe. Deliberately does not touch the database.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called in `main.rs` (and the integration tests) to configure the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    // Health Check Route
    .route("/health", web::get().to(health_check_handler))
    // Storefront Routes
    .route("/", web::get().to(crate::web::handlers::product_handlers::home_handler))
    .service(web::scope("/products").route(
      "/{product_id}",
      web::get().to(crate::web::handlers::product_handlers::get_product_handler),
    ))
    // Authentication Routes
    .service(
      web::scope("/auth")
        .route(
          "/register",
          web::post().to(crate::web::handlers::auth_handlers::register_handler),
        )
        .route(
          "/login",
          web::post().to(crate::web::handlers::auth_handlers::login_handler),
        )
        .route(
          "/logout",
          web::post().to(crate::web::handlers::auth_handlers::logout_handler),
        ),
    )
    // Profile Routes
    .service(
      web::resource("/profile")
        .route(web::get().to(crate::web::handlers::profile_handlers::get_profile_handler))
        .route(web::post().to(crate::web::handlers::profile_handlers::update_profile_handler)),
    )
    // Cart Routes
    .service(
      web::scope("/cart")
        .route("", web::get().to(crate::web::handlers::cart_handlers::cart_detail_handler))
        // Browser links add items, so this is a GET by design of the storefront UI.
        .route(
          "/add/{product_id}",
          web::get().to(crate::web::handlers::cart_handlers::add_to_cart_handler),
        ),
    )
    // Checkout Routes
    .service(
      web::scope("/checkout")
        .route(
          "/cod",
          web::post().to(crate::web::handlers::checkout_handlers::cod_handler),
        )
        .route(
          "/session",
          web::post().to(crate::web::handlers::checkout_handlers::create_session_handler),
        )
        // Wrong-method hits answer the fixed 405 body instead of actix's default.
        .default_service(web::route().to(crate::web::handlers::checkout_handlers::method_not_allowed_handler)),
    )
    // Payment provider return path
    .service(web::scope("/payment").route(
      "/success",
      web::get().to(crate::web::handlers::checkout_handlers::payment_success_handler),
    ));
}
