use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AnswerValue, AssessmentError, BatteryKind};
use super::service::{AssessmentService, SessionServiceError};
use super::store::{SessionId, SessionStore, StoreError};

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerPayload {
    pub(crate) value: AnswerValue,
}

/// Router builder exposing the respondent-facing assessment endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(start_handler::<S>))
        .route(
            "/api/v1/assessments/:session_id",
            get(state_handler::<S>).delete(discard_handler::<S>),
        )
        .route("/api/v1/assessments/:session_id/answers", post(answer_handler::<S>))
        .route("/api/v1/assessments/:session_id/report", get(report_handler::<S>))
        .route("/api/v1/assessments/:session_id/restart", post(restart_handler::<S>))
        .route("/api/v1/catalog/:battery", get(catalog_handler::<S>))
        .with_state(service)
}

pub(crate) async fn start_handler<S>(State(service): State<Arc<AssessmentService<S>>>) -> Response
where
    S: SessionStore + 'static,
{
    match service.start() {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn state_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.state(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn answer_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
    axum::Json(payload): axum::Json<AnswerPayload>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.answer(&SessionId(session_id), payload.value) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.report(&SessionId(session_id)) {
        Ok(report) => {
            let payload = json!({
                "report": report,
                "summary": report.summary(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn restart_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.restart(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn discard_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.discard(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn catalog_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(battery): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match BatteryKind::from_key(&battery) {
        Some(kind) => {
            let view = service.catalogs().get(kind).to_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        None => {
            let payload = json!({
                "error": format!("unknown battery '{battery}'"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

fn error_response(err: SessionServiceError) -> Response {
    let status = match &err {
        SessionServiceError::Assessment(AssessmentError::InvalidAnswer { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SessionServiceError::Assessment(AssessmentError::OutOfSequence(_)) => StatusCode::CONFLICT,
        SessionServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        SessionServiceError::Store(StoreError::CapacityExceeded(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        SessionServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        SessionServiceError::Assessment(AssessmentError::InvalidCatalog(_))
        | SessionServiceError::Store(StoreError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let mut payload = json!({ "error": err.to_string() });
    if let SessionServiceError::Assessment(AssessmentError::InvalidAnswer {
        question_id,
        rejection,
    }) = &err
    {
        payload["question_id"] = json!(question_id);
        payload["rejection"] = json!(rejection);
    }

    (status, axum::Json(payload)).into_response()
}
