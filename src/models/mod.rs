// src/models/mod.rs

//! Data structures representing database entities.

pub mod cart_item;
pub mod product;
pub mod profile;
pub mod session;
pub mod user;

pub use cart_item::{CartItem, CartLine};
pub use product::Product;
pub use profile::Profile;
pub use session::Session;
pub use user::User;
