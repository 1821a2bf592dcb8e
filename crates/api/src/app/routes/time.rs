use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/entries", post(submit_entry).get(list_entries))
        .route("/stats", get(today_stats))
}

/// POST /time/entries - submit one clock action gated by the daily code.
pub async fn submit_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::SubmitEntryRequest>,
) -> axum::response::Response {
    // The directory row must exist before time is recorded against it.
    if let Err(e) = services.ensure_profile(
        principal.employee_id(),
        principal.email(),
        principal.role(),
    ) {
        return errors::store_error_to_response(e);
    }

    match services.submit_entry(principal.employee_id(), body.action, &body.code, Utc::now()) {
        Ok(entry) => (
            StatusCode::CREATED,
            Json(dto::EntryRow::from_entry(&entry)),
        )
            .into_response(),
        Err(e) => errors::submit_error_to_response(e),
    }
}

/// GET /time/entries - the caller's entries for today, newest first.
pub async fn list_entries(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.today_entries(principal.employee_id(), Utc::now()) {
        Ok(entries) => Json(
            entries
                .iter()
                .map(dto::EntryRow::from_entry)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /time/stats - the caller's derived day statistics.
pub async fn today_stats(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.today_stats(principal.employee_id(), Utc::now()) {
        Ok(stats) => Json(dto::DayStatsResponse::from_stats(&stats)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
