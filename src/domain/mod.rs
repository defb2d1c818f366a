pub mod errors;
pub mod event;
pub mod scope;
pub mod user;
