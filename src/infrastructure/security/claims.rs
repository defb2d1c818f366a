// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::{scope::EntityId, user::UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::time::{Duration, UNIX_EPOCH};

/// Reads the session facts of a verified token back into the caller.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    facts
        .into_iter()
        .fold(SessionFacts::default(), SessionFacts::absorb)
        .into_user()
}

#[derive(Default)]
struct SessionFacts {
    user: Option<(i64, String)>,
    admin: bool,
    entity: Option<i64>,
    third_party_id: Option<i64>,
    issued_at: Option<u64>,
    expires_at: Option<u64>,
}

fn required<T>(value: Option<T>, fact: &str) -> ApplicationResult<T> {
    value.ok_or_else(|| ApplicationError::unauthorized(format!("session lacks {fact} fact")))
}

fn timestamp(seconds: u64) -> DateTime<Utc> {
    DateTime::<Utc>::from(UNIX_EPOCH + Duration::from_secs(seconds))
}

impl SessionFacts {
    fn absorb(mut self, fact: Fact) -> Self {
        let Predicate { name, terms, .. } = fact.predicate;
        match (name.as_str(), terms.as_slice()) {
            ("user", [Term::Integer(id), Term::Str(login)]) => {
                self.user = Some((*id, login.clone()));
            }
            ("admin", [Term::Bool(flag)]) => self.admin = *flag,
            ("entity", [Term::Integer(id)]) => self.entity = Some(*id),
            ("third_party", [Term::Integer(id)]) if *id > 0 => self.third_party_id = Some(*id),
            ("issued_at", [Term::Date(seconds)]) => self.issued_at = Some(*seconds),
            ("expires_at", [Term::Date(seconds)]) => self.expires_at = Some(*seconds),
            _ => {}
        }
        self
    }

    fn into_user(self) -> ApplicationResult<AuthenticatedUser> {
        let (user_id, login) = required(self.user, "user")?;
        let entity = i32::try_from(required(self.entity, "entity")?)
            .map_err(|_| ApplicationError::unauthorized("entity out of range"))?;

        Ok(AuthenticatedUser {
            id: UserId::new(user_id)?,
            login,
            admin: self.admin,
            entity: EntityId::new(entity)?,
            third_party_id: self.third_party_id,
            issued_at: timestamp(required(self.issued_at, "issued_at")?),
            expires_at: timestamp(required(self.expires_at, "expires_at")?),
        })
    }
}
