use crate::domain::scope::EntityId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokenDto {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

/// Identity supplied by the session layer for the duration of one request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub login: String,
    pub admin: bool,
    pub entity: EntityId,
    /// Set for external users bound to a third party (customer/supplier
    /// portal accounts).
    pub third_party_id: Option<i64>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn is_external(&self) -> bool {
        self.third_party_id.is_some_and(|id| id > 0)
    }
}

#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub user_id: UserId,
    pub login: String,
    pub admin: bool,
    pub entity: EntityId,
    pub third_party_id: Option<i64>,
}
