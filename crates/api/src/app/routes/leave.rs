use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use fichaje_leave::LeaveRequest;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/requests", post(create_request).get(list_requests))
}

/// POST /leave/requests - submit a pending request.
pub async fn create_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateLeaveRequest>,
) -> axum::response::Response {
    let request = match LeaveRequest::submit(
        principal.employee_id(),
        body.leave_type,
        body.start_date,
        body.end_date,
        body.reason,
        Utc::now(),
    ) {
        Ok(r) => r,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string())
        }
    };

    match services.create_leave(request) {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /leave/requests - the caller's requests, newest first.
pub async fn list_requests(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.my_leave(principal.employee_id()) {
        Ok(requests) => Json(requests).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
