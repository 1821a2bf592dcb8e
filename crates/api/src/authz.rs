use axum::http::StatusCode;

use crate::app::errors;
use crate::context::PrincipalContext;

/// Gate a handler to administrators.
///
/// Returns the ready-to-send 403 response on failure so handlers can
/// early-return with `?`-free match syntax.
pub fn require_admin(principal: &PrincipalContext) -> Result<(), axum::response::Response> {
    fichaje_auth::require_admin(principal.role())
        .map_err(|e| errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()))
}
