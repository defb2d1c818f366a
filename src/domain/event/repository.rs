// src/domain/event/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::event::entity::{Event, EventId, NewEvent};
use crate::domain::event::filter::{EventFilter, PageRequest, Sort};
use crate::domain::scope::{EntityId, EntityScope};
use async_trait::async_trait;

/// One page of events. `has_more` is derived from the extra row fetched past
/// the page size; that row is never part of `events`.
#[derive(Debug, Clone, Default)]
pub struct EventSlice {
    pub events: Vec<Event>,
    pub has_more: bool,
}

impl EventSlice {
    /// Trim a `limit + 1` fetch down to `limit` rows.
    pub fn from_overfetch(mut events: Vec<Event>, limit: u32) -> Self {
        let limit = limit as usize;
        let has_more = events.len() > limit;
        events.truncate(limit);
        Self { events, has_more }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeOutcome {
    pub deleted: u64,
    pub record_id: EventId,
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list(
        &self,
        scope: &EntityScope,
        filter: &EventFilter,
        sort: Sort,
        page: PageRequest,
    ) -> DomainResult<EventSlice>;

    /// Delete every event of `entity` and insert `record`, all or nothing.
    async fn purge(&self, entity: EntityId, record: NewEvent) -> DomainResult<PurgeOutcome>;
}
