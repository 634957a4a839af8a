use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use induction_core::model::{AnswerRecord, Attempt, ProfileDraft, Question};
use serde::{Deserialize, Serialize};
use services::{AppServices, LookupError, Submission, SubmissionError};
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub services: AppServices,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/check-name", get(check_name_info).post(check_name))
        .route("/api/submit-results", post(submit_results))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

//
// ─── LOOKUP ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct CheckNameRequest {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckNameResponse {
    success: bool,
    has_completions: bool,
    completions: Vec<Attempt>,
    searched_name: String,
    has_recent_completion: bool,
    recent_completion: Option<Attempt>,
    message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            details,
        }),
    )
        .into_response()
}

async fn check_name_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Check name endpoint. POST {\"name\": \"...\"} to look up training records.",
    }))
}

async fn check_name(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CheckNameRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid JSON in request body",
                Some(rejection.body_text()),
            );
        }
    };

    match state.services.lookup().lookup(&req.name).await {
        Ok(outcome) => {
            let message = outcome.message();
            Json(CheckNameResponse {
                success: true,
                has_completions: outcome.has_completions(),
                has_recent_completion: outcome.has_recent_completion(),
                completions: outcome.completions,
                searched_name: outcome.searched_name,
                recent_completion: outcome.recent,
                message,
            })
            .into_response()
        }
        Err(LookupError::InvalidInput(details)) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid name", Some(details))
        }
        Err(LookupError::Configuration(details)) => {
            error!(%details, "lookup rejected: store not configured");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error",
                Some("Record store credentials are missing".into()),
            )
        }
        Err(err) => {
            error!(error = %err, "lookup failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database query failed",
                Some(err.to_string()),
            )
        }
    }
}

//
// ─── SUBMISSION ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserData {
    #[serde(default)]
    name: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    host_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitRequest {
    user_data: UserData,
    answers: Vec<AnswerRecord>,
    #[serde(default)]
    questions: Vec<Question>,
    passed: bool,
    score: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inserted_row: Option<Attempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl SubmitResponse {
    fn failed(error: &str, details: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            inserted_row: None,
            error: Some(error.to_string()),
            details: Some(details.into()),
        }
    }
}

async fn submit_results(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> (StatusCode, Json<SubmitResponse>) {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(SubmitResponse::failed(
                    "Invalid request body",
                    rejection.body_text(),
                )),
            );
        }
    };

    if !req.questions.is_empty() && req.questions.len() != req.answers.len() {
        return (
            StatusCode::BAD_REQUEST,
            Json(SubmitResponse::failed(
                "Invalid submission",
                format!(
                    "{} answers for {} questions",
                    req.answers.len(),
                    req.questions.len()
                ),
            )),
        );
    }

    let draft = ProfileDraft {
        name: req.user_data.name,
        company: req.user_data.company,
        phone: req.user_data.phone,
        host_name: req.user_data.host_name,
    };
    let profile = match draft.validate() {
        Ok(profile) => profile,
        Err(err) => {
            let details = err
                .errors()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return (
                StatusCode::BAD_REQUEST,
                Json(SubmitResponse::failed("Invalid user data", details)),
            );
        }
    };

    let submission = Submission {
        profile,
        answers: req.answers,
        score: req.score,
        passed: req.passed,
    };

    match state.services.submission().submit(&submission).await {
        Ok(row) => {
            info!(attempt_id = %row.id(), "submission stored");
            (
                StatusCode::OK,
                Json(SubmitResponse {
                    success: true,
                    message: Some("Assessment results saved successfully".into()),
                    inserted_row: Some(row),
                    error: None,
                    details: None,
                }),
            )
        }
        Err(SubmissionError::InvalidInput(details)) => (
            StatusCode::BAD_REQUEST,
            Json(SubmitResponse::failed("Invalid submission", details)),
        ),
        Err(SubmissionError::Configuration(details)) => {
            error!(%details, "submission rejected: store not configured");
            (
                StatusCode::OK,
                Json(SubmitResponse::failed(
                    "Server configuration error",
                    "Record store credentials are missing",
                )),
            )
        }
        Err(err) => {
            warn!(error = %err, "submission not stored");
            (
                StatusCode::OK,
                Json(SubmitResponse::failed(
                    "Failed to save assessment results",
                    err.to_string(),
                )),
            )
        }
    }
}

#[cfg(test)]
#[path = "tests/routes_tests.rs"]
mod tests;
