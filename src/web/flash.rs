// src/web/flash.rs

//! One-shot confirmation messages carried in a cookie.
//!
//! The storefront endpoints answer mutating browser requests with a
//! redirect; the message the user should see on the next page travels
//! in a short-lived cookie the frontend reads and deletes.

use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::HttpResponse;

pub const FLASH_COOKIE: &str = "flash_message";

/// 302 redirect to `location` carrying `message` in the flash cookie.
pub fn redirect_with_flash(location: &str, message: &str) -> HttpResponse {
  HttpResponse::Found()
    .insert_header((header::LOCATION, location))
    .cookie(
      Cookie::build(FLASH_COOKIE, message)
        .path("/")
        .http_only(false) // The frontend reads and clears it
        .finish(),
    )
    .finish()
}
