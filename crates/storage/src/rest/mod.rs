//! Attempt store reached over a PostgREST-style HTTP API.
//!
//! Rows live in the `assessment_results` resource. Filters use the
//! `column=op.value` query dialect and every request carries the access key
//! both as `apikey` and as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use induction_core::model::{Attempt, NewAttempt};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::repository::{AttemptRepository, NameMatch, Storage, StorageError};

pub const STORE_URL_ENV: &str = "INDUCTION_STORE_URL";
pub const STORE_KEY_ENV: &str = "INDUCTION_STORE_KEY";

const RESOURCE_PATH: &str = "rest/v1/assessment_results";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RestConfigError {
    #[error("{STORE_URL_ENV} is not set")]
    MissingUrl,

    #[error("{STORE_KEY_ENV} is not set")]
    MissingKey,

    #[error("invalid store url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("http client could not be built: {0}")]
    Client(String),
}

/// Location and credentials of the remote store.
#[derive(Clone)]
pub struct RestStoreConfig {
    base_url: Url,
    access_key: String,
}

impl std::fmt::Debug for RestStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("access_key", &"<redacted>")
            .finish()
    }
}

impl RestStoreConfig {
    /// # Errors
    ///
    /// Returns `RestConfigError` when either value is blank or the URL does
    /// not parse.
    pub fn new(base_url: &str, access_key: &str) -> Result<Self, RestConfigError> {
        let base_url = base_url.trim();
        let access_key = access_key.trim();
        if base_url.is_empty() {
            return Err(RestConfigError::MissingUrl);
        }
        if access_key.is_empty() {
            return Err(RestConfigError::MissingKey);
        }

        let parsed = Url::parse(base_url).map_err(|e| RestConfigError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.scheme() != "https" {
            tracing::warn!(url = %parsed, "attempt store is not reached over https");
        }

        Ok(Self {
            base_url: parsed,
            access_key: access_key.to_owned(),
        })
    }

    /// Read the store settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`RestStoreConfig::from_lookup`].
    pub fn from_env() -> Result<Self, RestConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the store settings through `lookup`, keyed by variable name.
    ///
    /// # Errors
    ///
    /// Returns `RestConfigError` when a variable is missing or blank, or the
    /// URL is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RestConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(STORE_URL_ENV).ok_or(RestConfigError::MissingUrl)?;
        let key = lookup(STORE_KEY_ENV).ok_or(RestConfigError::MissingKey)?;
        Self::new(&url, &key)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resource_url(&self) -> String {
        format!(
            "{}/{RESOURCE_PATH}",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

//
// ─── FILTERS ───────────────────────────────────────────────────────────────────
//

/// Escape pattern metacharacters so the searched name matches literally.
fn escape_pattern(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_' | '*') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// The `name` filter value for one matching strategy.
pub(crate) fn name_filter(name: &str, strategy: NameMatch) -> String {
    match strategy {
        NameMatch::Exact => format!("eq.{name}"),
        NameMatch::CaseInsensitive => format!("ilike.{}", escape_pattern(name)),
        NameMatch::Contains => format!("ilike.*{}*", escape_pattern(name)),
    }
}

#[derive(Debug, Serialize)]
struct NewAttemptRow<'a> {
    name: &'a str,
    company: &'a str,
    phone: Option<&'a str>,
    host_name: &'a str,
    score: u32,
    passed: bool,
    completed_at: DateTime<Utc>,
}

impl<'a> From<&'a NewAttempt> for NewAttemptRow<'a> {
    fn from(attempt: &'a NewAttempt) -> Self {
        Self {
            name: &attempt.name,
            company: &attempt.company,
            phone: attempt.phone.as_deref(),
            host_name: &attempt.host_name,
            score: attempt.score,
            passed: attempt.passed,
            completed_at: attempt.completed_at,
        }
    }
}

//
// ─── REPOSITORY ────────────────────────────────────────────────────────────────
//

#[derive(Clone)]
pub struct RestRepository {
    client: Client,
    config: RestStoreConfig,
}

impl RestRepository {
    /// # Errors
    ///
    /// Returns `RestConfigError::Client` if the HTTP client cannot be built.
    pub fn new(config: RestStoreConfig) -> Result<Self, RestConfigError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RestConfigError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.access_key)
            .bearer_auth(&self.config.access_key)
    }
}

fn connection(e: reqwest::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

async fn rejected(response: reqwest::Response) -> StorageError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%status, body = %body, "attempt store rejected request");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StorageError::Configuration(format!("store refused credentials ({status})"))
        }
        StatusCode::CONFLICT => StorageError::Conflict,
        _ => StorageError::Backend(format!("{status}: {body}")),
    }
}

#[async_trait]
impl AttemptRepository for RestRepository {
    async fn insert_attempt(&self, attempt: NewAttempt) -> Result<Attempt, StorageError> {
        let row = NewAttemptRow::from(&attempt);
        let response = self
            .authorized(self.client.post(self.config.resource_url()))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(connection)?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        let mut stored: Vec<Attempt> = response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        if stored.is_empty() {
            return Err(StorageError::Backend("insert returned no rows".into()));
        }
        Ok(stored.swap_remove(0))
    }

    async fn find_by_name(
        &self,
        name: &str,
        strategy: NameMatch,
    ) -> Result<Vec<Attempt>, StorageError> {
        let filter = name_filter(name, strategy);
        let response = self
            .authorized(self.client.get(self.config.resource_url()))
            .query(&[
                ("select", "*"),
                ("name", filter.as_str()),
                ("order", "completed_at.desc"),
            ])
            .send()
            .await
            .map_err(connection)?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

impl Storage {
    /// Build a `Storage` backed by the remote store.
    ///
    /// # Errors
    ///
    /// Returns `RestConfigError` if the HTTP client cannot be built.
    pub fn rest(config: RestStoreConfig) -> Result<Self, RestConfigError> {
        let repo = RestRepository::new(config)?;
        Ok(Self::new(std::sync::Arc::new(repo)))
    }

    /// Remote store from the environment, or an unconfigured stand-in that
    /// reports why every call fails.
    #[must_use]
    pub fn rest_from_env_or_unconfigured() -> Self {
        match RestStoreConfig::from_env().and_then(Self::rest) {
            Ok(storage) => storage,
            Err(err) => {
                tracing::warn!(error = %err, "attempt store unavailable");
                Self::unconfigured(err.to_string())
            }
        }
    }
}
