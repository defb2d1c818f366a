use crate::domain::errors::DomainError;
use sqlx::error::ErrorKind;

/// `events.fk_user` -> `users.rowid`
const EVENT_USER_FK: &str = "events_fk_user_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::Database(db_err) => match (db_err.kind(), db_err.constraint()) {
            (ErrorKind::ForeignKeyViolation, Some(EVENT_USER_FK)) => {
                DomainError::NotFound("acting user not found".into())
            }
            (ErrorKind::ForeignKeyViolation, _) => {
                DomainError::NotFound("referenced record not found".into())
            }
            (ErrorKind::CheckViolation, constraint) => DomainError::Validation(format!(
                "check constraint {} violated",
                constraint.unwrap_or("(unnamed)")
            )),
            _ => DomainError::Persistence(db_err.message().to_string()),
        },
        sqlx::Error::RowNotFound => DomainError::NotFound("event not found".into()),
        other => DomainError::Persistence(other.to_string()),
    }
}
