// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod repos;
pub mod security;
pub mod time;

pub use repos::{InMemoryEventRepo, StoredEvent};
pub use security::{
    ADMIN_TOKEN, DummyTokenManager, EXTERNAL_ADMIN_TOKEN, OTHER_ENTITY_ADMIN_TOKEN, USER_TOKEN,
    user_for,
};
pub use time::{FixedClock, fixed_now};
