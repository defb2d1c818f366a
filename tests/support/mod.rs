// tests/support/mod.rs
// Each test binary pulls in a different subset of these helpers.
#![allow(dead_code, unused_imports)]

pub mod builders;
pub mod helpers;
pub mod mocks;

pub use builders::*;
pub use helpers::*;
pub use mocks::*;
