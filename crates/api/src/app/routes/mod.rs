use axum::{routing::get, Router};

pub mod admin;
pub mod employees;
pub mod leave;
pub mod system;
pub mod time;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/stream", get(system::stream))
        .nest("/employees", employees::router())
        .nest("/time", time::router())
        .nest("/leave", leave::router())
        .nest("/admin", admin::router())
}
