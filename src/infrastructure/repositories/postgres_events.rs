use super::{map_sqlx, natural_search::push_natural_search};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::event::{
    Event, EventFilter, EventId, EventRepository, EventSlice, EventUser, NewEvent, PageRequest,
    PurgeOutcome, Sort, SortField,
};
use crate::domain::scope::{EntityId, EntityScope};
use crate::domain::user::{UserId, UserStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor, PgPool, Postgres, QueryBuilder, Transaction};

const SELECT_EVENTS: &str = "SELECT e.rowid, e.type AS event_type, e.ip, e.user_agent, e.dateevent, \
     e.fk_user, e.description, e.prefix_session, \
     u.login AS user_login, u.admin AS user_admin, u.entity AS user_entity, \
     u.firstname AS user_firstname, u.lastname AS user_lastname, u.statut AS user_status \
     FROM events AS e LEFT JOIN users AS u ON u.rowid = e.fk_user";

#[derive(Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records a single event. The console only ever writes purge records;
    /// this is how fixtures and the modules that emit events seed the table.
    pub async fn insert(&self, event: NewEvent) -> DomainResult<EventId> {
        let id = insert_event(&self.pool, &event).await.map_err(map_sqlx)?;
        EventId::new(id)
    }
}

#[derive(Debug, FromRow)]
struct EventRow {
    rowid: i64,
    event_type: String,
    ip: String,
    user_agent: Option<String>,
    dateevent: DateTime<Utc>,
    fk_user: Option<i64>,
    description: String,
    prefix_session: Option<String>,
    user_login: Option<String>,
    user_admin: Option<i16>,
    user_entity: Option<i32>,
    user_firstname: Option<String>,
    user_lastname: Option<String>,
    user_status: Option<i16>,
}

impl TryFrom<EventRow> for Event {
    type Error = DomainError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let user = match (row.fk_user, row.user_login) {
            (Some(id), Some(login)) if id > 0 => Some(EventUser {
                id: UserId::new(id)?,
                login,
                admin: row.user_admin.unwrap_or(0) != 0,
                entity: EntityId::new(row.user_entity.unwrap_or(0))?,
                firstname: row.user_firstname,
                lastname: row.user_lastname,
                status: UserStatus::from_code(row.user_status.unwrap_or(1)),
            }),
            _ => None,
        };

        Ok(Event {
            id: EventId::new(row.rowid)?,
            event_type: row.event_type,
            ip: row.ip,
            user_agent: row.user_agent,
            occurred_at: row.dateevent,
            description: row.description,
            prefix_session: row.prefix_session,
            user,
        })
    }
}

impl PostgresEventRepository {
    fn apply_conditions(
        builder: &mut QueryBuilder<'_, Postgres>,
        scope: &EntityScope,
        filter: &EventFilter,
    ) {
        builder.push(" WHERE e.entity = ANY(");
        builder.push_bind(scope.visible_ids());
        builder.push(")");

        if let Some(start) = filter.date_start {
            builder.push(" AND e.dateevent >= ");
            builder.push_bind(start);
        }
        if let Some(end) = filter.date_end {
            builder.push(" AND e.dateevent <= ");
            builder.push_bind(end);
        }
        if let Some(rowid) = filter.rowid {
            builder.push(" AND e.rowid = ");
            builder.push_bind(rowid);
        }
        for (column, value) in filter.text_searches() {
            push_natural_search(builder, column, value);
        }
    }

    fn apply_ordering(builder: &mut QueryBuilder<'_, Postgres>, sort: Sort) {
        builder.push(" ORDER BY ");
        builder.push(sort.field.as_param());
        builder.push(" ");
        builder.push(sort.order.as_sql());
        if sort.field != SortField::RowId {
            builder.push(", e.rowid ");
            builder.push(sort.order.as_sql());
        }
    }
}

async fn insert_event<'e, E>(executor: E, event: &NewEvent) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO events (type, entity, prefix_session, dateevent, fk_user, description, ip, user_agent)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING rowid
        "#,
    )
    .bind(&event.event_type)
    .bind(i32::from(event.entity))
    .bind(event.prefix_session.as_deref())
    .bind(event.occurred_at)
    .bind(event.user_id.map(i64::from))
    .bind(&event.description)
    .bind(&event.ip)
    .bind(event.user_agent.as_deref())
    .fetch_one(executor)
    .await
}

/// Inside the purge transaction every failure means nothing was persisted,
/// whatever constraint tripped.
fn purge_failed(err: sqlx::Error) -> DomainError {
    match map_sqlx(err) {
        DomainError::Persistence(msg) => DomainError::Persistence(msg),
        other => DomainError::Persistence(format!("purge rolled back: {other}")),
    }
}

async fn rollback_quietly(tx: Transaction<'_, Postgres>) {
    if let Err(err) = tx.rollback().await {
        tracing::warn!(error = %err, "rollback of purge transaction failed");
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn list(
        &self,
        scope: &EntityScope,
        filter: &EventFilter,
        sort: Sort,
        page: PageRequest,
    ) -> DomainResult<EventSlice> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_EVENTS);
        Self::apply_conditions(&mut builder, scope, filter);
        Self::apply_ordering(&mut builder, sort);
        builder.push(" LIMIT ");
        builder.push_bind(page.fetch_limit());
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());

        let rows = builder
            .build_query_as::<EventRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let events = rows
            .into_iter()
            .map(Event::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EventSlice::from_overfetch(events, page.limit))
    }

    async fn purge(&self, entity: EntityId, record: NewEvent) -> DomainResult<PurgeOutcome> {
        let record = NewEvent { entity, ..record };
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let deleted = match sqlx::query("DELETE FROM events WHERE entity = $1")
            .bind(i32::from(entity))
            .execute(&mut *tx)
            .await
        {
            Ok(result) => result.rows_affected(),
            Err(err) => {
                rollback_quietly(tx).await;
                return Err(purge_failed(err));
            }
        };

        let record_id = match insert_event(&mut *tx, &record).await {
            Ok(id) => id,
            Err(err) => {
                tracing::error!(error = %err, entity = %entity, "recording purge failed, rolling back");
                rollback_quietly(tx).await;
                return Err(purge_failed(err));
            }
        };

        tx.commit().await.map_err(map_sqlx)?;

        Ok(PurgeOutcome {
            deleted,
            record_id: EventId::new(record_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purge_errors_always_count_as_storage_failures() {
        assert!(matches!(
            purge_failed(sqlx::Error::RowNotFound),
            DomainError::Persistence(msg) if msg.starts_with("purge rolled back")
        ));
        assert!(matches!(
            purge_failed(sqlx::Error::PoolClosed),
            DomainError::Persistence(_)
        ));
    }
}
