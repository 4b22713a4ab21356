use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::{ContactRequest, RoyalPostRequest};
use super::service::{SubmissionError, SubmissionService};
use crate::mailer::MailDispatcher;

/// Router builder exposing the two form-submission endpoints.
pub fn intake_router<M>(service: Arc<SubmissionService<M>>) -> Router
where
    M: MailDispatcher + 'static,
{
    Router::new()
        .route("/api/v1/royal-post", post(royal_post_handler::<M>))
        .route("/api/v1/contact", post(contact_handler::<M>))
        .with_state(service)
}

pub(crate) async fn royal_post_handler<M>(
    State(service): State<Arc<SubmissionService<M>>>,
    payload: Result<Json<RoyalPostRequest>, JsonRejection>,
) -> Response
where
    M: MailDispatcher + 'static,
{
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return malformed_body(rejection),
    };

    let today = Local::now().date_naive();
    submission_response(service.submit_royal_post(request, today).await)
}

pub(crate) async fn contact_handler<M>(
    State(service): State<Arc<SubmissionService<M>>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Response
where
    M: MailDispatcher + 'static,
{
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return malformed_body(rejection),
    };

    submission_response(service.submit_contact(request).await)
}

/// Unparseable bodies are reported like validation failures.
fn malformed_body(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": "Invalid request body",
        "details": rejection.body_text(),
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn submission_response(
    result: Result<crate::mailer::DispatchReceipt, SubmissionError>,
) -> Response {
    match result {
        Ok(receipt) => {
            let payload = json!({
                "message": "Form submitted successfully",
                "id": receipt.id,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(SubmissionError::Validation(errors)) => {
            let payload = json!({
                "error": "Invalid form data",
                "details": errors.entries(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(SubmissionError::Assembly(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(SubmissionError::Dispatch(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
