// src/application/ports/mod.rs
pub mod forgery;
pub mod localization;
pub mod security;
pub mod time;
