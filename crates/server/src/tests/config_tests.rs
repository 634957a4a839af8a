use std::collections::HashMap;

use storage::{AttemptRepository, NameMatch};

use super::*;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_without_file_or_env() {
    let settings = settings_from(None, env_of(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn env_overrides_file() {
    let file = r#"
        bind_addr = "0.0.0.0:8080"
        store_url = "https://file.example.com"
    "#;
    let settings = settings_from(
        Some(file),
        env_of(&[
            ("SERVER_BIND", "127.0.0.1:9000"),
            ("INDUCTION_STORE_KEY", "key"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:9000");
    assert_eq!(settings.store_url.as_deref(), Some("https://file.example.com"));
    assert_eq!(settings.store_key.as_deref(), Some("key"));
    assert!(settings.rest_config().is_ok());
}

#[test]
fn blank_database_url_is_ignored() {
    let settings = settings_from(None, env_of(&[("INDUCTION_DB_URL", "  ")]));
    assert_eq!(settings.database_url, None);
}

#[test]
fn unreadable_file_falls_back_to_defaults() {
    let settings = settings_from(Some("not = [valid"), env_of(&[]));
    assert_eq!(settings.server_bind, Settings::default().server_bind);
}

#[tokio::test]
async fn missing_credentials_build_unconfigured_store() {
    let storage = build_storage(&Settings::default()).await.expect("storage");
    let err = storage
        .attempts
        .find_by_name("Jane Doe", NameMatch::Exact)
        .await
        .unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn database_url_selects_sqlite() {
    let settings = Settings {
        database_url: Some("sqlite:file:memdb_server_config?mode=memory&cache=shared".into()),
        ..Settings::default()
    };
    let storage = build_storage(&settings).await.expect("storage");
    let found = storage
        .attempts
        .find_by_name("Jane Doe", NameMatch::Exact)
        .await
        .expect("query");
    assert!(found.is_empty());
}
