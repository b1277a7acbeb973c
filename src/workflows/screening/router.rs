use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::oracle::{CompletionOracle, OracleError};

use super::domain::{InterviewId, ScreeningAnswers};
use super::repository::ScreeningRepository;
use super::service::{CvScreeningService, ScreeningError, ScreeningRequest};

/// Router builder exposing the CV screening endpoint.
pub fn screening_router<R, O>(service: Arc<CvScreeningService<R, O>>) -> Router
where
    R: ScreeningRepository + 'static,
    O: CompletionOracle + 'static,
{
    Router::new()
        .route("/api/v1/screening/cv", post(screen_handler::<R, O>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScreenCvRequest {
    interview_id: String,
    applicant_email: String,
    #[serde(default)]
    pre_screening_answers: Option<ScreeningAnswers>,
}

pub(crate) async fn screen_handler<R, O>(
    State(service): State<Arc<CvScreeningService<R, O>>>,
    axum::Json(request): axum::Json<ScreenCvRequest>,
) -> Response
where
    R: ScreeningRepository + 'static,
    O: CompletionOracle + 'static,
{
    let request = ScreeningRequest {
        interview_id: InterviewId(request.interview_id),
        applicant_email: request.applicant_email,
        answers: request.pre_screening_answers,
    };

    match service.screen(request).await {
        Ok(update) => (StatusCode::OK, axum::Json(update)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ScreeningError) -> Response {
    let (status, message) = match &err {
        ScreeningError::ApplicationNotFound => (
            StatusCode::NOT_FOUND,
            "No application found for the selected job.".to_string(),
        ),
        ScreeningError::CvNotFound => (
            StatusCode::NOT_FOUND,
            "You have not uploaded a CV for this application.".to_string(),
        ),
        ScreeningError::PostingNotFound => (
            StatusCode::NOT_FOUND,
            "The job posting for this application no longer exists.".to_string(),
        ),
        ScreeningError::InvalidVerdict(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "The screening model returned an invalid response.".to_string(),
        ),
        ScreeningError::Oracle(OracleError::Timeout) => {
            (StatusCode::GATEWAY_TIMEOUT, err.to_string())
        }
        ScreeningError::Oracle(_) => (StatusCode::BAD_GATEWAY, err.to_string()),
        ScreeningError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    };

    let payload = json!({
        "error": "CV Screening Failed",
        "message": message,
    });
    (status, axum::Json(payload)).into_response()
}
