use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use fichaje_infra::{StoreError, SubmitError};

/// Map a submit failure to its HTTP shape.
///
/// Sequence and code rejections are user-correctable, so the message is the
/// text shown inline to the employee. A store failure after consumption
/// tells the employee the code is spent and a fresh one is needed.
pub fn submit_error_to_response(err: SubmitError) -> axum::response::Response {
    match err {
        SubmitError::Sequence(violation) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "sequence_violation",
            violation.to_string(),
        ),
        SubmitError::Code(rejection) => {
            json_error(StatusCode::CONFLICT, "code_rejected", rejection.to_string())
        }
        SubmitError::Store {
            source,
            code_spent: true,
        } => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            format!("{source}; the validation code is now spent, request a new one"),
        ),
        SubmitError::Store { source, .. } => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            source.to_string(),
        ),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::Conflict => {
            json_error(StatusCode::CONFLICT, "conflict", "conditional update conflict")
        }
        StoreError::Unavailable(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
