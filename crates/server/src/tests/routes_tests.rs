use super::*;
use axum::{body, body::Body, http::Request};
use induction_core::model::Quiz;
use induction_core::time::fixed_now;
use serde_json::{Value, json};
use services::Clock;
use storage::Storage;
use tower::ServiceExt;

fn test_app(storage: &Storage) -> Router {
    let services = AppServices::from_storage(storage, Clock::fixed(fixed_now()));
    build_router(Arc::new(AppState { services }))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn all_correct_submission(name: &str) -> Value {
    let quiz = Quiz::site_induction();
    let answers: Vec<Value> = quiz
        .questions()
        .iter()
        .enumerate()
        .map(|(i, q)| {
            json!({
                "questionIndex": i,
                "selectedAnswer": q.correct_answer(),
                "isCorrect": true
            })
        })
        .collect();
    json!({
        "userData": {
            "name": name,
            "company": "Acme Foods",
            "phone": "0412345678",
            "hostName": "Sam Host"
        },
        "answers": answers,
        "questions": quiz.questions(),
        "passed": true,
        "score": quiz.len()
    })
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app(&Storage::in_memory());
    let request = Request::get("/healthz").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn check_name_get_describes_endpoint() {
    let app = test_app(&Storage::in_memory());
    let request = Request::get("/api/check-name")
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("POST"));
}

#[tokio::test]
async fn check_name_rejects_short_names() {
    let app = test_app(&Storage::in_memory());
    let (status, body) = send(app, post_json("/api/check-name", &json!({ "name": " J " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid name");
}

#[tokio::test]
async fn check_name_rejects_malformed_json() {
    let app = test_app(&Storage::in_memory());
    let request = Request::post("/api/check-name")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON in request body");
}

#[tokio::test]
async fn check_name_without_records() {
    let app = test_app(&Storage::in_memory());
    let (status, body) =
        send(app, post_json("/api/check-name", &json!({ "name": "Jane Doe" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["hasCompletions"], false);
    assert_eq!(body["hasRecentCompletion"], false);
    assert_eq!(body["recentCompletion"], Value::Null);
    assert_eq!(body["searchedName"], "Jane Doe");
}

#[tokio::test]
async fn submit_then_check_name_finds_recent_completion() {
    let storage = Storage::in_memory();

    let (status, body) = send(
        test_app(&storage),
        post_json("/api/submit-results", &all_correct_submission("Jane Doe")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["insertedRow"]["passed"], true);
    assert_eq!(body["insertedRow"]["score"], 6);
    assert_eq!(body["insertedRow"]["host_name"], "Sam Host");

    let (status, body) = send(
        test_app(&storage),
        post_json("/api/check-name", &json!({ "name": "jane doe" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasCompletions"], true);
    assert_eq!(body["hasRecentCompletion"], true);
    assert_eq!(body["completions"].as_array().unwrap().len(), 1);
    assert_eq!(body["recentCompletion"]["name"], "Jane Doe");
}

#[tokio::test]
async fn submit_rejects_inconsistent_pass_flag() {
    let mut payload = all_correct_submission("Jane Doe");
    payload["answers"][0]["isCorrect"] = json!(false);
    payload["score"] = json!(5);

    let (status, body) = send(
        test_app(&Storage::in_memory()),
        post_json("/api/submit-results", &payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn submit_rejects_score_that_contradicts_answers() {
    let storage = Storage::in_memory();
    let mut payload = all_correct_submission("Jane Doe");
    payload["score"] = json!(0);

    let (status, body) = send(
        test_app(&storage),
        post_json("/api/submit-results", &payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(
        test_app(&storage),
        post_json("/api/check-name", &json!({ "name": "Jane Doe" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasCompletions"], false);
}

#[tokio::test]
async fn submit_rejects_invalid_user_data() {
    let mut payload = all_correct_submission("Jane Doe");
    payload["userData"]["phone"] = json!("12345");

    let (status, body) = send(
        test_app(&Storage::in_memory()),
        post_json("/api/submit-results", &payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("10 digits"));
}

#[tokio::test]
async fn unconfigured_store_splits_status_by_endpoint() {
    let storage = Storage::unconfigured("INDUCTION_STORE_URL is not set");

    let (status, body) = send(
        test_app(&storage),
        post_json("/api/check-name", &json!({ "name": "Jane Doe" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server configuration error");

    let (status, body) = send(
        test_app(&storage),
        post_json("/api/submit-results", &all_correct_submission("Jane Doe")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Server configuration error");
}
