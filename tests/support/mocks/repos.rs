// tests/support/mocks/repos.rs
use async_trait::async_trait;
use audit_console::domain::{
    errors::{DomainError, DomainResult},
    event::{
        Event, EventFilter, EventId, EventRepository, EventSlice, EventUser, NewEvent,
        PageRequest, PurgeOutcome, SearchColumn, Sort, SortField, SortOrder,
    },
    scope::{EntityId, EntityScope},
};
use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub event: Event,
    pub entity: EntityId,
}

/// Event table kept in memory. The failure switches make the next purge fail
/// at the delete or at the insert of the purge record.
#[derive(Default)]
pub struct InMemoryEventRepo {
    rows: Mutex<Vec<StoredEvent>>,
    users: Mutex<Vec<EventUser>>,
    fail_delete: AtomicBool,
    fail_insert: AtomicBool,
    fail_list: AtomicBool,
    list_calls: AtomicUsize,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<StoredEvent>) -> Self {
        let repo = Self::default();
        *repo.rows.lock().unwrap() = events;
        repo
    }

    /// Users joined onto events inserted through the repository.
    pub fn with_user(self, user: EventUser) -> Self {
        self.users.lock().unwrap().push(user);
        self
    }

    pub fn fail_delete(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    pub fn fail_insert(&self) {
        self.fail_insert.store(true, Ordering::SeqCst);
    }

    pub fn fail_list(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<StoredEvent> {
        self.rows.lock().unwrap().clone()
    }

    pub fn events_in(&self, entity: EntityId) -> Vec<Event> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.entity == entity)
            .map(|row| row.event.clone())
            .collect()
    }

    fn next_id(rows: &[StoredEvent]) -> i64 {
        rows.iter().map(|r| i64::from(r.event.id)).max().unwrap_or(0) + 1
    }

    fn materialize(&self, rows: &[StoredEvent], event: NewEvent) -> StoredEvent {
        let user = event.user_id.and_then(|id| {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == id)
                .cloned()
        });
        StoredEvent {
            entity: event.entity,
            event: Event {
                id: EventId::new(Self::next_id(rows)).unwrap(),
                event_type: event.event_type,
                ip: event.ip,
                user_agent: event.user_agent,
                occurred_at: event.occurred_at,
                description: event.description,
                prefix_session: event.prefix_session,
                user,
            },
        }
    }
}

fn column_value(event: &Event, column: SearchColumn) -> String {
    match column {
        SearchColumn::Code => event.event_type.clone(),
        SearchColumn::Ip => event.ip.clone(),
        SearchColumn::UserLogin => event.user.as_ref().map(|u| u.login.clone()).unwrap_or_default(),
        SearchColumn::Description => event.description.clone(),
        SearchColumn::UserAgent => event.user_agent.clone().unwrap_or_default(),
        SearchColumn::PrefixSession => event.prefix_session.clone().unwrap_or_default(),
    }
}

fn matches(event: &Event, filter: &EventFilter) -> bool {
    if filter.date_start.is_some_and(|start| event.occurred_at < start) {
        return false;
    }
    if filter.date_end.is_some_and(|end| event.occurred_at > end) {
        return false;
    }
    if filter.rowid.is_some_and(|id| i64::from(event.id) != id) {
        return false;
    }
    filter.text_searches().into_iter().all(|(column, value)| {
        let haystack = column_value(event, column).to_lowercase();
        value
            .split_whitespace()
            .all(|term| haystack.contains(&term.to_lowercase()))
    })
}

#[async_trait]
impl EventRepository for InMemoryEventRepo {
    async fn list(
        &self,
        scope: &EntityScope,
        filter: &EventFilter,
        sort: Sort,
        page: PageRequest,
    ) -> DomainResult<EventSlice> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("connection reset".into()));
        }

        let mut events: Vec<Event> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| scope.contains(row.entity))
            .filter(|row| matches(&row.event, filter))
            .map(|row| row.event.clone())
            .collect();

        events.sort_by(|a, b| {
            let primary = match sort.field {
                SortField::Date => a.occurred_at.cmp(&b.occurred_at),
                SortField::Code => a.event_type.cmp(&b.event_type),
                SortField::Ip => a.ip.cmp(&b.ip),
                _ => std::cmp::Ordering::Equal,
            };
            let ordering = primary.then(a.id.cmp(&b.id));
            match sort.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let page_rows: Vec<Event> = events
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.fetch_limit() as usize)
            .collect();

        Ok(EventSlice::from_overfetch(page_rows, page.limit))
    }

    async fn purge(&self, entity: EntityId, record: NewEvent) -> DomainResult<PurgeOutcome> {
        let mut rows = self.rows.lock().unwrap();
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("delete failed".into()));
        }

        let before = rows.clone();
        rows.retain(|row| row.entity != entity);
        let deleted = (before.len() - rows.len()) as u64;

        if self.fail_insert.load(Ordering::SeqCst) {
            *rows = before;
            return Err(DomainError::Persistence("insert failed".into()));
        }

        let stored = self.materialize(&before, NewEvent { entity, ..record });
        let record_id = stored.event.id;
        rows.push(stored);

        Ok(PurgeOutcome { deleted, record_id })
    }
}
