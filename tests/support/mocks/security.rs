// tests/support/mocks/security.rs
use audit_console::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::TokenManager,
};
use audit_console::domain::{scope::EntityId, user::UserId};
use async_trait::async_trait;
use chrono::Duration;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";
pub const EXTERNAL_ADMIN_TOKEN: &str = "external-admin-token";
pub const OTHER_ENTITY_ADMIN_TOKEN: &str = "other-entity-admin-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

/// Identity behind each test token, `None` for tokens that must be rejected.
pub fn user_for(token: &str) -> Option<AuthenticatedUser> {
    let (id, login, admin, entity, third_party_id) = match token {
        ADMIN_TOKEN => (1, "admin", true, 1, None),
        USER_TOKEN => (2, "jdoe", false, 1, None),
        EXTERNAL_ADMIN_TOKEN => (3, "portal", true, 1, Some(9)),
        OTHER_ENTITY_ADMIN_TOKEN => (4, "admin2", true, 2, None),
        _ => return None,
    };
    let now = super::time::fixed_now();
    Some(AuthenticatedUser {
        id: UserId(id),
        login: login.into(),
        admin,
        entity: EntityId(entity),
        third_party_id,
        issued_at: now,
        expires_at: now + Duration::hours(1),
    })
}

#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, _subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        Err(ApplicationError::infrastructure("not implemented"))
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("expired token")),
            other => user_for(other).ok_or_else(|| ApplicationError::unauthorized("invalid token")),
        }
    }
}
