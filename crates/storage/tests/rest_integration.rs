use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use induction_core::model::NewAttempt;
use induction_core::time::fixed_now;
use serde_json::{Value, json};
use storage::NameMatch;
use storage::rest::{RestRepository, RestStoreConfig};
use storage::{AttemptRepository, StorageError};

#[derive(Clone, Default)]
struct Recorded {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    headers: Arc<Mutex<Vec<HeaderMap>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

fn row(id: u64, name: &str, passed: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "company": "Acme Foods",
        "phone": "0412345678",
        "host_name": "Sam Host",
        "score": if passed { 6 } else { 5 },
        "passed": passed,
        "completed_at": "2025-08-20T09:00:00+00:00"
    })
}

async fn list(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.queries.lock().unwrap().push(params);
    rec.headers.lock().unwrap().push(headers);
    Json(json!([row(2, "Jane Doe", true), row(1, "Jane Doe", false)]))
}

async fn create(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.headers.lock().unwrap().push(headers);
    let mut stored = body.clone();
    stored["id"] = json!(41);
    rec.bodies.lock().unwrap().push(body);
    (StatusCode::CREATED, Json(json!([stored])))
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn fake_store() -> (RestRepository, Recorded) {
    let rec = Recorded::default();
    let router = Router::new()
        .route("/rest/v1/assessment_results", get(list).post(create))
        .with_state(rec.clone());
    let base = spawn(router).await;
    let config = RestStoreConfig::new(&base, "anon-key").unwrap();
    (RestRepository::new(config).unwrap(), rec)
}

#[tokio::test]
async fn lookup_sends_filter_order_and_credentials() {
    let (repo, rec) = fake_store().await;

    let found = repo
        .find_by_name("Jane", NameMatch::Contains)
        .await
        .expect("lookup");
    assert_eq!(found.len(), 2);
    assert!(found[0].passed());

    let queries = rec.queries.lock().unwrap();
    assert_eq!(queries[0].get("name").map(String::as_str), Some("ilike.*Jane*"));
    assert_eq!(
        queries[0].get("order").map(String::as_str),
        Some("completed_at.desc")
    );

    let headers = rec.headers.lock().unwrap();
    assert_eq!(headers[0].get("apikey").unwrap(), "anon-key");
    assert_eq!(headers[0].get("authorization").unwrap(), "Bearer anon-key");
}

#[tokio::test]
async fn insert_posts_row_and_returns_representation() {
    let (repo, rec) = fake_store().await;

    let stored = repo
        .insert_attempt(NewAttempt {
            name: "Jane Doe".into(),
            company: "Acme Foods".into(),
            phone: Some("0412345678".into()),
            host_name: "Sam Host".into(),
            score: 6,
            passed: true,
            completed_at: fixed_now(),
        })
        .await
        .expect("insert");

    assert_eq!(stored.id().value(), 41);
    assert_eq!(stored.completed_at(), fixed_now());

    let bodies = rec.bodies.lock().unwrap();
    assert_eq!(bodies[0]["host_name"], "Sam Host");
    assert_eq!(bodies[0]["passed"], true);
    assert!(bodies[0].get("id").is_none());

    let headers = rec.headers.lock().unwrap();
    assert_eq!(headers[0].get("prefer").unwrap(), "return=representation");
}

#[tokio::test]
async fn server_errors_surface_as_backend_failures() {
    let router = Router::new().route(
        "/rest/v1/assessment_results",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn(router).await;
    let repo = RestRepository::new(RestStoreConfig::new(&base, "key").unwrap()).unwrap();

    let err = repo
        .find_by_name("Jane", NameMatch::Exact)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Backend(_)));
}

#[tokio::test]
async fn rejected_credentials_surface_as_configuration_errors() {
    let router = Router::new().route(
        "/rest/v1/assessment_results",
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let base = spawn(router).await;
    let repo = RestRepository::new(RestStoreConfig::new(&base, "key").unwrap()).unwrap();

    let err = repo
        .find_by_name("Jane", NameMatch::Exact)
        .await
        .unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn unreachable_store_is_a_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = RestStoreConfig::new(&format!("http://{addr}"), "key").unwrap();
    let repo = RestRepository::new(config).unwrap();
    let err = repo
        .find_by_name("Jane", NameMatch::Exact)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Connection(_)));
}
