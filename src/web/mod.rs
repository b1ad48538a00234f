// src/web/mod.rs

// Declare child modules
pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod routes;
pub mod security_headers;

// Re-export key items so main.rs and tests reach them directly.
pub use routes::configure_app_routes;
pub use security_headers::SecurityHeaders;
