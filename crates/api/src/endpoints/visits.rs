//! Visit tracking endpoint.

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::post,
};
use corkboard_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

/// Visit tracking request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackVisitRequest {
    pub path: String,
}

/// Visit tracking response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackVisitResponse {
    pub ok: bool,
}

/// Record a page visit. Failures are swallowed so tracking can never
/// break the page.
async fn track_visit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<TrackVisitRequest>,
) -> AppResult<ApiResponse<TrackVisitResponse>> {
    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    if let Err(e) = state.visit_service.track(&req.path, user_agent).await {
        tracing::debug!(error = %e, "Failed to record visit");
    }

    Ok(ApiResponse::ok(TrackVisitResponse { ok: true }))
}

/// Create the visits router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(track_visit))
}
