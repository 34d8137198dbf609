//! API endpoints.

mod admin;
mod auth;
mod posts;
mod visits;

use axum::Router;

use crate::middleware::AppState;
use crate::sse;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/posts", posts::router())
        .nest("/admin", admin::router())
        .nest("/visits", visits::router())
        .nest("/streaming", sse::router())
}
