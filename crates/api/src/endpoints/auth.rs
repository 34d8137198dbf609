//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::{get, post}};
use corkboard_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Signin request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Signin response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub id: String,
    pub email: String,
    pub token: String,
}

/// Sign in to the admin dashboard.
async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> AppResult<ApiResponse<SigninResponse>> {
    let result = state
        .account_service
        .sign_in(&req.email, &req.password)
        .await?;

    Ok(ApiResponse::ok(SigninResponse {
        id: result.user.id,
        email: result.user.email,
        token: result.token,
    }))
}

/// Session response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
}

/// Get the current session.
///
/// A failed role lookup is reported as non-admin; the lookup itself
/// writes the error-level audit entry.
async fn session(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let is_admin = state
        .account_service
        .is_admin(&user.id)
        .await
        .unwrap_or(false);

    Ok(ApiResponse::ok(SessionResponse {
        id: user.id,
        email: user.email,
        is_admin,
    }))
}

/// Signout response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignoutResponse {
    pub ok: bool,
}

/// Sign out, invalidating the current token.
async fn signout(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<SignoutResponse>> {
    state.account_service.sign_out(&user.id).await?;

    Ok(ApiResponse::ok(SignoutResponse { ok: true }))
}

/// Create the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signin", post(signin))
        .route("/auth/session", get(session))
        .route("/auth/signout", post(signout))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_user, empty_mock, test_state};
    use corkboard_db::entities::user_role;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_session_reports_admin_role() {
        let role = user_role::Model {
            id: "r1".to_string(),
            user_id: "u1".to_string(),
            role: "admin".to_string(),
            created_at: chrono::Utc::now().into(),
        };
        let role_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[role]])
                .into_connection(),
        );
        let state = test_state(empty_mock(), role_db);
        let user = create_test_user("u1", "admin@example.com");

        let response = session(AuthUser(user), State(state)).await.unwrap();

        assert!(response.data.is_admin);
    }

    #[tokio::test]
    async fn test_session_role_lookup_failure_is_non_admin() {
        let role_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("connection reset".to_string())])
                .into_connection(),
        );
        let state = test_state(empty_mock(), role_db);
        let user = create_test_user("u1", "admin@example.com");

        let response = session(AuthUser(user), State(state)).await.unwrap();

        assert!(!response.data.is_admin);
    }
}
