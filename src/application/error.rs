// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No usable session token.
    #[error("not authenticated: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to read or purge events.
    #[error("access denied: {0}")]
    Forbidden(String),

    /// Token, signing or rendering machinery failed.
    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    /// True when the request was valid but storage or infrastructure let it
    /// down. A failed purge is reported on the page instead of as an error page.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::Persistence(_)) | Self::Infrastructure(_)
        )
    }
}
