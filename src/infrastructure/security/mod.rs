// src/infrastructure/security/mod.rs
pub mod claims;
pub mod forgery;
pub mod token;
