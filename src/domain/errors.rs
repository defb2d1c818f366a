// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A value object rejected its input (non-positive ids and the like).
    #[error("invalid value: {0}")]
    Validation(String),
    #[error("missing record: {0}")]
    NotFound(String),
    /// Storage failure. The message is for logs only, never for the page.
    #[error("storage failure: {0}")]
    Persistence(String),
}
