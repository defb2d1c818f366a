pub mod database;
pub mod localization;
pub mod repositories;
pub mod security;
pub mod time;
