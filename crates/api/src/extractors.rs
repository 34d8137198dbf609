//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use corkboard_db::entities::user;

use crate::middleware::{AdminFlag, AppState};

/// Authenticated user extractor.
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get user from request extensions (set by auth middleware)
        parts
            .extensions
            .get::<user::Model>()
            .cloned()
            .map(AuthUser)
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

/// Authenticated admin extractor.
///
/// Requires both a resolved user and the admin flag set by the auth
/// middleware. A valid token without the admin role gets 403 and a
/// warn-level audit entry.
#[derive(Debug, Clone)]
pub struct AdminUser(pub user::Model);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<user::Model>()
            .cloned()
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized"))?;

        if !parts
            .extensions
            .get::<AdminFlag>()
            .is_some_and(|flag| flag.0)
        {
            state.audit.warn(
                "Unauthorized admin access attempt",
                serde_json::json!({ "email": user.email }),
            );
            return Err((StatusCode::FORBIDDEN, "Admin role required"));
        }

        Ok(Self(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_user, empty_mock, test_state};
    use axum::http::Request;

    fn parts_with(user: Option<user::Model>, flag: Option<AdminFlag>) -> Parts {
        let req = Request::builder().uri("/").body(()).unwrap();
        let (mut parts, ()) = req.into_parts();
        if let Some(user) = user {
            parts.extensions.insert(user);
        }
        if let Some(flag) = flag {
            parts.extensions.insert(flag);
        }
        parts
    }

    #[tokio::test]
    async fn test_admin_user_without_token_is_401() {
        let state = test_state(empty_mock(), empty_mock());
        let mut parts = parts_with(None, None);

        let result = AdminUser::from_request_parts(&mut parts, &state).await;

        assert_eq!(result.unwrap_err().0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_user_without_role_is_403() {
        let state = test_state(empty_mock(), empty_mock());
        let user = create_test_user("u1", "user@example.com");
        let mut parts = parts_with(Some(user), Some(AdminFlag(false)));

        let result = AdminUser::from_request_parts(&mut parts, &state).await;

        assert_eq!(result.unwrap_err().0, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_user_with_role_resolves() {
        let state = test_state(empty_mock(), empty_mock());
        let user = create_test_user("u1", "admin@example.com");
        let mut parts = parts_with(Some(user), Some(AdminFlag(true)));

        let result = AdminUser::from_request_parts(&mut parts, &state).await;

        assert_eq!(result.unwrap().0.id, "u1");
    }

    #[tokio::test]
    async fn test_auth_user_from_extensions() {
        let user = create_test_user("u1", "admin@example.com");
        let mut parts = parts_with(Some(user), None);

        let result = AuthUser::from_request_parts(&mut parts, &()).await;

        assert_eq!(result.unwrap().0.email, "admin@example.com");
    }
}
