//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::rest::RestConfigError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `LookupService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LookupError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[source] StorageError),
    #[error("record store is not configured: {0}")]
    Configuration(String),
}

impl From<StorageError> for LookupError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Configuration(reason) => Self::Configuration(reason),
            other => Self::StoreUnavailable(other),
        }
    }
}

/// Errors emitted by `SubmissionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmissionError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[source] StorageError),
    #[error("record store is not configured: {0}")]
    Configuration(String),
}

impl From<StorageError> for SubmissionError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Configuration(reason) => Self::Configuration(reason),
            other => Self::StoreUnavailable(other),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    RestConfig(#[from] RestConfigError),
}
