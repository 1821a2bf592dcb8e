//! Admin-only endpoints: dashboard counters, daily codes, the day's entries,
//! and leave decisions.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use fichaje_core::{EntryId, LeaveRequestId};
use fichaje_leave::LeaveDecision;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/stats", get(overview))
        .route("/codes", post(issue_code))
        .route("/codes/current", get(current_code))
        .route("/entries", get(list_entries))
        .route("/entries/:id/validate", post(revalidate_entry))
        .route("/leave/requests", get(list_leave))
        .route("/leave/requests/:id/approve", post(approve_leave))
        .route("/leave/requests/:id/reject", post(reject_leave))
}

/// GET /admin/stats - headcount, today's entry count, absences.
pub async fn overview(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_admin(&principal) {
        return resp;
    }

    match services.admin_overview(Utc::now()) {
        Ok(counts) => Json(serde_json::json!({
            "active_employees": counts.active_employees,
            "today_entries": counts.today_entries,
            "absences": counts.absences,
        }))
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// POST /admin/codes - issue a fresh daily code.
pub async fn issue_code(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_admin(&principal) {
        return resp;
    }

    match services.issue_code(principal.employee_id(), Utc::now()) {
        Ok(code) => (StatusCode::CREATED, Json(code)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /admin/codes/current - the active code for today, 404 when none.
pub async fn current_code(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_admin(&principal) {
        return resp;
    }

    match services.current_code(Utc::now()) {
        Ok(Some(code)) => Json(code).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no active code for today",
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /admin/entries - today's entries for all employees, newest first.
pub async fn list_entries(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_admin(&principal) {
        return resp;
    }

    match services.entries_overview(Utc::now()) {
        Ok(rows) => Json(
            rows.iter()
                .map(|(entry, employee)| dto::AdminEntryRow::new(entry, employee.as_ref()))
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// POST /admin/entries/:id/validate - re-point an entry at the reviewing
/// admin.
pub async fn revalidate_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_admin(&principal) {
        return resp;
    }

    let id: EntryId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid entry id")
        }
    };

    match services.revalidate_entry(id, principal.employee_id()) {
        Ok(entry) => Json(dto::EntryRow::from_entry(&entry)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /admin/leave/requests - every request, newest first.
pub async fn list_leave(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_admin(&principal) {
        return resp;
    }

    match services.all_leave() {
        Ok(requests) => Json(requests).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// POST /admin/leave/requests/:id/approve
pub async fn approve_leave(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    decide_leave(services, principal, id, LeaveDecision::Approve)
}

/// POST /admin/leave/requests/:id/reject
pub async fn reject_leave(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    decide_leave(services, principal, id, LeaveDecision::Reject)
}

fn decide_leave(
    services: Arc<AppServices>,
    principal: PrincipalContext,
    id: String,
    decision: LeaveDecision,
) -> axum::response::Response {
    if let Err(resp) = authz::require_admin(&principal) {
        return resp;
    }

    let id: LeaveRequestId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid request id")
        }
    };

    match services.decide_leave(id, decision, principal.employee_id()) {
        Ok(request) => Json(request).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
