//! Shared fixtures for handler and extractor tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use corkboard_common::{AppResult, StorageBackend, UploadedFile};
use corkboard_core::{
    AccountService, AnalyticsService, AuditLogger, ModerationService, PostService,
    RateLimitService, VisitService,
};
use corkboard_db::entities::user;
use corkboard_db::repositories::{
    PostRepository, RateLimitRepository, SystemLogRepository, UserRepository, UserRoleRepository,
    WebsiteVisitRepository,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use crate::middleware::AppState;
use crate::sse::SseBroadcaster;

pub(crate) struct NullStorage;

#[async_trait]
impl StorageBackend for NullStorage {
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<UploadedFile> {
        Ok(UploadedFile {
            key: key.to_string(),
            url: format!("/files/{key}"),
            size: data.len() as u64,
            content_type: content_type.to_string(),
            md5: String::new(),
        })
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("/files/{key}")
    }

    async fn exists(&self, _key: &str) -> AppResult<bool> {
        Ok(false)
    }
}

pub(crate) fn empty_mock() -> Arc<DatabaseConnection> {
    Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

pub(crate) fn create_test_user(id: &str, email: &str) -> user::Model {
    user::Model {
        id: id.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$unused".to_string(),
        token: Some("test-token".to_string()),
        created_at: Utc::now().into(),
    }
}

/// Build an `AppState` over mock connections. The user and role
/// connections are injectable so tests can queue results or errors.
pub(crate) fn test_state(
    user_db: Arc<DatabaseConnection>,
    role_db: Arc<DatabaseConnection>,
) -> AppState {
    let audit = AuditLogger::new(SystemLogRepository::new(empty_mock()));
    let rate_limiter = RateLimitService::new(RateLimitRepository::new(empty_mock()), 5);

    let post_service = PostService::new(
        PostRepository::new(empty_mock()),
        rate_limiter,
        Arc::new(NullStorage),
        audit.clone(),
        100 * 1024,
    );
    let moderation_service = ModerationService::new(PostRepository::new(empty_mock()), audit.clone());
    let account_service =
        AccountService::new(UserRepository::new(user_db), UserRoleRepository::new(role_db), audit.clone());
    let analytics_service = AnalyticsService::new(
        PostRepository::new(empty_mock()),
        WebsiteVisitRepository::new(empty_mock()),
    );
    let visit_service = VisitService::new(WebsiteVisitRepository::new(empty_mock()));

    AppState {
        post_service,
        moderation_service,
        account_service,
        analytics_service,
        visit_service,
        audit,
        sse_broadcaster: SseBroadcaster::new(),
    }
}
