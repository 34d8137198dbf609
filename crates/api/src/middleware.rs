//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use corkboard_core::{
    AccountService, AnalyticsService, AuditLogger, ModerationService, PostService, VisitService,
};

use crate::sse::SseBroadcaster;

/// Marker inserted by the auth middleware when the resolved user holds
/// the admin role.
#[derive(Debug, Clone, Copy)]
pub struct AdminFlag(pub bool);

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub post_service: PostService,
    pub moderation_service: ModerationService,
    pub account_service: AccountService,
    pub analytics_service: AnalyticsService,
    pub visit_service: VisitService,
    pub audit: AuditLogger,
    pub sse_broadcaster: SseBroadcaster,
}

/// Authentication middleware.
///
/// Resolves a bearer token to a user and records whether that user holds
/// the admin role. Requests without a valid token pass through untouched
/// and are rejected by the extractors where authentication is required.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(Some(user)) = state.account_service.find_by_token(token).await
    {
        let is_admin = state
            .account_service
            .is_admin(&user.id)
            .await
            .unwrap_or(false);
        req.extensions_mut().insert(user);
        req.extensions_mut().insert(AdminFlag(is_admin));
    }

    next.run(req).await
}
