use std::{collections::HashMap, fs};

use storage::Storage;
use storage::rest::{RestConfigError, RestStoreConfig, STORE_KEY_ENV, STORE_URL_ENV};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    /// `SQLite` URL; when set it takes precedence over the remote store.
    pub database_url: Option<String>,
    pub store_url: Option<String>,
    pub store_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            database_url: None,
            store_url: None,
            store_key: None,
        }
    }
}

/// Read `server.toml` from the working directory, then apply environment
/// overrides.
pub fn load_settings() -> Settings {
    let file = fs::read_to_string("server.toml").ok();
    settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn settings_from<F>(file: Option<&str>, env: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.server_bind = v.clone();
                }
                if let Some(v) = file_cfg.get("database_url") {
                    settings.database_url = Some(v.clone());
                }
                if let Some(v) = file_cfg.get("store_url") {
                    settings.store_url = Some(v.clone());
                }
                if let Some(v) = file_cfg.get("store_key") {
                    settings.store_key = Some(v.clone());
                }
            }
            Err(error) => warn!(%error, "ignoring unreadable server.toml"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("INDUCTION_DB_URL") {
        settings.database_url = Some(v);
    }
    if let Some(v) = env(STORE_URL_ENV) {
        settings.store_url = Some(v);
    }
    if let Some(v) = env(STORE_KEY_ENV) {
        settings.store_key = Some(v);
    }

    settings.database_url = settings.database_url.filter(|url| !url.trim().is_empty());
    settings
}

impl Settings {
    pub fn rest_config(&self) -> Result<RestStoreConfig, RestConfigError> {
        RestStoreConfig::from_lookup(|key| match key {
            STORE_URL_ENV => self.store_url.clone(),
            STORE_KEY_ENV => self.store_key.clone(),
            _ => None,
        })
    }
}

/// Pick the attempt store: `SQLite` when a database URL is set, otherwise the
/// remote store, otherwise an unconfigured store that fails every request.
pub async fn build_storage(settings: &Settings) -> anyhow::Result<Storage> {
    if let Some(database_url) = &settings.database_url {
        let storage = Storage::sqlite(database_url).await?;
        return Ok(storage);
    }

    match settings.rest_config() {
        Ok(config) => Ok(Storage::rest(config)?),
        Err(error) => {
            warn!(%error, "attempt store is not configured; requests will fail");
            Ok(Storage::unconfigured(error.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
