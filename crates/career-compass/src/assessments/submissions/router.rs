use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::super::domain::QuizKind;
use super::domain::{AssessmentSubmission, QuestionSheet, ResultId, UserId};
use super::repository::{RepositoryError, ResultRepository};
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing the question bank, submission, result and history endpoints.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: ResultRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments/:quiz/questions",
            get(questions_handler::<R>),
        )
        .route("/api/v1/assessments/:quiz/submit", post(submit_handler::<R>))
        .route("/api/v1/results/:result_id", get(result_handler::<R>))
        .route(
            "/api/v1/students/:user_id/results",
            get(history_handler::<R>),
        )
        .route(
            "/api/v1/students/:user_id/analysis",
            get(analysis_handler::<R>),
        )
        .with_state(service)
}

fn unknown_quiz(raw: &str) -> Response {
    let payload = json!({
        "error": format!("unknown quiz '{raw}'"),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Submission(_) => StatusCode::BAD_REQUEST,
        AssessmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn questions_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(quiz): Path<String>,
) -> Response
where
    R: ResultRepository + 'static,
{
    let Ok(kind) = quiz.parse::<QuizKind>() else {
        return unknown_quiz(&quiz);
    };
    let definition = service.definition(kind);
    let sheet = QuestionSheet::from_definition(&definition);
    (StatusCode::OK, axum::Json(sheet)).into_response()
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(quiz): Path<String>,
    axum::Json(submission): axum::Json<AssessmentSubmission>,
) -> Response
where
    R: ResultRepository + 'static,
{
    let Ok(kind) = quiz.parse::<QuizKind>() else {
        return unknown_quiz(&quiz);
    };
    match service.submit(kind, submission, Utc::now()) {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn result_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(result_id): Path<String>,
) -> Response
where
    R: ResultRepository + 'static,
{
    match service.get(&ResultId(result_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.test_result())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ResultRepository + 'static,
{
    match service.history(&UserId(user_id)) {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn analysis_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ResultRepository + 'static,
{
    match service.analysis(&UserId(user_id)) {
        Ok(analysis) => (StatusCode::OK, axum::Json(analysis)).into_response(),
        Err(error) => error_response(error),
    }
}
