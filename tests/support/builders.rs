// tests/support/builders.rs
use super::mocks::{StoredEvent, fixed_now};
use audit_console::domain::{
    event::{Event, EventId, EventUser},
    scope::EntityId,
    user::{UserId, UserStatus},
};
use chrono::{DateTime, Duration, Utc};

pub struct EventBuilder {
    id: i64,
    entity: i32,
    event_type: String,
    ip: String,
    user_agent: Option<String>,
    occurred_at: DateTime<Utc>,
    description: String,
    prefix_session: Option<String>,
    user: Option<EventUser>,
}

impl EventBuilder {
    /// A login event in entity 1, a few hours before `fixed_now()`.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            entity: 1,
            event_type: "USER_LOGIN".into(),
            ip: "10.0.0.1".into(),
            user_agent: Some("Mozilla/5.0".into()),
            occurred_at: fixed_now() - Duration::hours(id),
            description: "UserLogged : admin".into(),
            prefix_session: None,
            user: Some(admin_user()),
        }
    }

    pub fn entity(mut self, entity: i32) -> Self {
        self.entity = entity;
        self
    }

    pub fn event_type(mut self, value: &str) -> Self {
        self.event_type = value.into();
        self
    }

    pub fn ip(mut self, value: &str) -> Self {
        self.ip = value.into();
        self
    }

    pub fn description(mut self, value: &str) -> Self {
        self.description = value.into();
        self
    }

    pub fn at(mut self, value: DateTime<Utc>) -> Self {
        self.occurred_at = value;
        self
    }

    pub fn user(mut self, user: Option<EventUser>) -> Self {
        self.user = user;
        self
    }

    pub fn build(self) -> StoredEvent {
        StoredEvent {
            entity: EntityId(self.entity),
            event: Event {
                id: EventId::new(self.id).expect("positive event id"),
                event_type: self.event_type,
                ip: self.ip,
                user_agent: self.user_agent,
                occurred_at: self.occurred_at,
                description: self.description,
                prefix_session: self.prefix_session,
                user: self.user,
            },
        }
    }
}

pub fn admin_user() -> EventUser {
    EventUser {
        id: UserId(1),
        login: "admin".into(),
        admin: true,
        entity: EntityId(1),
        firstname: Some("Ada".into()),
        lastname: Some("Admin".into()),
        status: UserStatus::Active,
    }
}

/// `count` events in `entity`, ids starting at `first_id`.
pub fn events_in(entity: i32, first_id: i64, count: i64) -> Vec<StoredEvent> {
    (first_id..first_id + count)
        .map(|id| EventBuilder::new(id).entity(entity).build())
        .collect()
}
