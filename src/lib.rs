// src/lib.rs

//! Tienda: a small hardened storefront service.
//!
//! The service exposes a product catalog, a per-user shopping cart, and a
//! checkout workflow with two terminal paths:
//!  - Cash on delivery: the cart is cleared synchronously and the client is
//!    redirected home.
//!  - Hosted payment session: a session is created against the configured
//!    payment provider and the cart is cleared only when the success
//!    callback is invoked later.
//!
//! Every outgoing response passes through the security-header injector,
//! which adds a fixed set of hardening headers unless an earlier stage of
//! the pipeline already set them.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
