use std::sync::Arc;

use storage::repository::Storage;
use storage::rest::RestStoreConfig;

use crate::Clock;
use crate::error::AppServicesError;
use crate::lookup_service::LookupService;
use crate::submission_service::SubmissionService;

/// Assembles the lookup and submission services over one store.
#[derive(Clone)]
pub struct AppServices {
    lookup: Arc<LookupService>,
    submission: Arc<SubmissionService>,
}

impl AppServices {
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        Self {
            lookup: Arc::new(LookupService::new(clock, Arc::clone(&storage.attempts))),
            submission: Arc::new(SubmissionService::new(clock, Arc::clone(&storage.attempts))),
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    /// Build services backed by the remote store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be built.
    pub fn new_rest(config: RestStoreConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::rest(config)?;
        Ok(Self::from_storage(&storage, clock))
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn lookup(&self) -> Arc<LookupService> {
        Arc::clone(&self.lookup)
    }

    #[must_use]
    pub fn submission(&self) -> Arc<SubmissionService> {
        Arc::clone(&self.submission)
    }
}
