// src/application/ports/forgery.rs
use crate::application::{ApplicationResult, dto::AuthenticatedUser};

/// Anti-forgery tokens guarding state-changing form posts. A token is bound
/// to the user it was issued for and expires.
pub trait AntiForgery: Send + Sync {
    fn issue(&self, actor: &AuthenticatedUser) -> ApplicationResult<String>;
    fn verify(&self, actor: &AuthenticatedUser, token: &str) -> ApplicationResult<()>;
}
