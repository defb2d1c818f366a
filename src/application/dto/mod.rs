// src/application/dto/mod.rs
pub mod auth;
pub mod events;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use events::{AdminBadge, EventListPage, EventRowDto, EventUserDto, RawEventListParams};
