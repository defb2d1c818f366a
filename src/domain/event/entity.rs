// src/domain/event/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::scope::EntityId;
use crate::domain::user::{UserId, UserStatus};
use chrono::{DateTime, Utc};
use std::fmt;

/// Type code recorded when the event table of an entity is purged.
pub const PURGE_EVENT_TYPE: &str = "SECURITY_EVENTS_PURGE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(i64);

impl EventId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("event id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<EventId> for i64 {
    fn from(value: EventId) -> Self {
        value.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Acting user joined onto an event row. Read-only.
#[derive(Debug, Clone)]
pub struct EventUser {
    pub id: UserId,
    pub login: String,
    pub admin: bool,
    pub entity: EntityId,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub status: UserStatus,
}

impl EventUser {
    /// Administrator not bound to any entity.
    pub fn is_super_admin(&self) -> bool {
        self.admin && self.entity.is_global()
    }

    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub event_type: String,
    pub ip: String,
    pub user_agent: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub description: String,
    pub prefix_session: Option<String>,
    pub user: Option<EventUser>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub event_type: String,
    pub ip: String,
    pub user_agent: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub description: String,
    pub prefix_session: Option<String>,
    pub user_id: Option<UserId>,
    pub entity: EntityId,
}

impl NewEvent {
    /// The record left behind by a purge of `entity`.
    pub fn purge_record(
        entity: EntityId,
        actor: UserId,
        description: impl Into<String>,
        ip: impl Into<String>,
        user_agent: Option<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_type: PURGE_EVENT_TYPE.to_string(),
            ip: ip.into(),
            user_agent,
            occurred_at,
            description: description.into(),
            prefix_session: None,
            user_id: Some(actor),
            entity,
        }
    }
}
