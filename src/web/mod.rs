//! Server-rendered pages

mod dashboard;
mod home;

use axum::{Router, routing::get};

use crate::AppState;

pub use dashboard::dashboard;
pub use home::home;

/// Create the page router
///
/// Routes:
/// - GET / - Landing page (public)
/// - GET /dashboard - Dashboard (session required)
pub fn pages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/dashboard", get(dashboard))
}
