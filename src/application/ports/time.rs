// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of "now" for purge records, anti-forgery tokens and the default
/// month range of the listing.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
