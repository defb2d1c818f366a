// src/infrastructure/repositories/mod.rs
mod error;
mod natural_search;
mod postgres_events;

pub use error::map_sqlx;
pub use postgres_events::PostgresEventRepository;
