// src/application/ports/security.rs
use crate::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
};
use async_trait::async_trait;

/// Session tokens carrying who the caller is and which entity they act in.
#[async_trait]
pub trait TokenManager: Send + Sync {
    /// Mints a token for `subject`. Only the `issue_token` tool and tests use it.
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto>;

    /// Verifies signature and expiry, then reads the identity facts back.
    /// A bad or expired token is `Unauthorized`.
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser>;
}
