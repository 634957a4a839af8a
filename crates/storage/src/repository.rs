use async_trait::async_trait;
use induction_core::model::{Attempt, AttemptId, NewAttempt};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("store rejected the request: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store is not configured: {0}")]
    Configuration(String),
}

impl StorageError {
    /// True for failures caused by missing or invalid store credentials.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

//
// ─── NAME MATCHING ─────────────────────────────────────────────────────────────
//

/// How a stored subject name is compared with a searched name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameMatch {
    /// Byte-for-byte equality.
    Exact,
    /// Equality ignoring letter case.
    CaseInsensitive,
    /// Searched name appears anywhere in the stored name, ignoring case.
    Contains,
}

impl NameMatch {
    /// Strategies from strictest to loosest.
    pub const ESCALATION: [NameMatch; 3] = [Self::Exact, Self::CaseInsensitive, Self::Contains];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case_insensitive",
            Self::Contains => "contains",
        }
    }

    /// Reference semantics used by in-process backends.
    #[must_use]
    pub fn matches(self, stored: &str, searched: &str) -> bool {
        match self {
            Self::Exact => stored == searched,
            Self::CaseInsensitive => stored.to_lowercase() == searched.to_lowercase(),
            Self::Contains => stored.to_lowercase().contains(&searched.to_lowercase()),
        }
    }
}

/// Append-only store of training attempts.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Write one new attempt and return it with its assigned identity.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the attempt cannot be stored.
    async fn insert_attempt(&self, attempt: NewAttempt) -> Result<Attempt, StorageError>;

    /// All attempts whose name matches `name` under `strategy`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be queried.
    async fn find_by_name(
        &self,
        name: &str,
        strategy: NameMatch,
    ) -> Result<Vec<Attempt>, StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    attempts: Arc<Mutex<Vec<Attempt>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored attempts.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.len())
    }
}

#[async_trait]
impl AttemptRepository for InMemoryRepository {
    async fn insert_attempt(&self, attempt: NewAttempt) -> Result<Attempt, StorageError> {
        let mut guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let next = u64::try_from(guard.len())
            .map_err(|_| StorageError::Serialization("attempt id overflow".into()))?
            + 1;
        let stored = Attempt::new(AttemptId::new(next), attempt);
        guard.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_name(
        &self,
        name: &str,
        strategy: NameMatch,
    ) -> Result<Vec<Attempt>, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut found: Vec<Attempt> = guard
            .iter()
            .filter(|attempt| strategy.matches(attempt.name(), name))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.completed_at().cmp(&a.completed_at()));
        Ok(found)
    }
}

//
// ─── UNCONFIGURED ──────────────────────────────────────────────────────────────
//

/// Stand-in used when store credentials are missing: every call fails with
/// `StorageError::Configuration` so the process keeps serving requests.
#[derive(Clone, Debug)]
pub struct UnconfiguredRepository {
    reason: String,
}

impl UnconfiguredRepository {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl AttemptRepository for UnconfiguredRepository {
    async fn insert_attempt(&self, _attempt: NewAttempt) -> Result<Attempt, StorageError> {
        Err(StorageError::Configuration(self.reason.clone()))
    }

    async fn find_by_name(
        &self,
        _name: &str,
        _strategy: NameMatch,
    ) -> Result<Vec<Attempt>, StorageError> {
        Err(StorageError::Configuration(self.reason.clone()))
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub attempts: Arc<dyn AttemptRepository>,
}

impl Storage {
    #[must_use]
    pub fn new(attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { attempts }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRepository::new()))
    }

    #[must_use]
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self::new(Arc::new(UnconfiguredRepository::new(reason)))
    }
}
