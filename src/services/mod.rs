// src/services/mod.rs

// Declare child modules
pub mod accounts;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod payment;
