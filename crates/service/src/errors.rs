use thiserror::Error;

use crate::cars::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn validation(reason: impl Into<String>) -> Self { Self::Validation(reason.into()) }
}

impl From<RepositoryError> for ServiceError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::not_found("car"),
            RepositoryError::Storage(e) => Self::Storage(e.to_string()),
        }
    }
}
