use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};

use crate::app::services::AppServices;
use crate::app::errors;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/me", get(me))
}

/// GET /employees/me - the caller's directory row, provisioned with
/// defaults on first contact.
pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.ensure_profile(
        principal.employee_id(),
        principal.email(),
        principal.role(),
    ) {
        Ok(employee) => Json(employee).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
