//! Moderation service for pinning and removing posts.

use corkboard_common::AppResult;
use corkboard_db::{entities::post, repositories::PostRepository};
use sea_orm::Set;

use super::{audit::AuditLogger, event_publisher::EventPublisherService};

/// Moderation service for admin actions on posts.
#[derive(Clone)]
pub struct ModerationService {
    post_repo: PostRepository,
    audit: AuditLogger,
    event_publisher: Option<EventPublisherService>,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(post_repo: PostRepository, audit: AuditLogger) -> Self {
        Self {
            post_repo,
            audit,
            event_publisher: None,
        }
    }

    /// Set the event publisher.
    pub fn set_event_publisher(&mut self, event_publisher: EventPublisherService) {
        self.event_publisher = Some(event_publisher);
    }

    /// Pin or unpin a post. Idempotent.
    pub async fn set_pinned(&self, id: &str, pinned: bool) -> AppResult<post::Model> {
        let post = self.post_repo.get_by_id(id).await?;

        if post.is_pinned == pinned {
            return Ok(post);
        }

        let mut active: post::ActiveModel = post.into();
        active.is_pinned = Set(pinned);
        let post = self.post_repo.update(active).await?;

        if let Some(ref event_publisher) = self.event_publisher {
            if let Err(e) = event_publisher.publish_post_updated(&post.id).await {
                tracing::warn!(error = %e, post_id = %post.id, "Failed to publish post updated event");
            }
        }

        Ok(post)
    }

    /// Delete a post.
    ///
    /// Deletions are audited; pin changes are not.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let post = self.post_repo.get_by_id(id).await?;

        if let Err(e) = self.post_repo.delete(&post.id).await {
            self.audit.error(
                "Failed to delete post",
                serde_json::json!({ "postId": post.id, "error": e.to_string() }),
            );
            return Err(e);
        }

        self.audit.info(
            "Admin deleted a post",
            serde_json::json!({ "postId": post.id, "name": post.name }),
        );

        if let Some(ref event_publisher) = self.event_publisher {
            if let Err(e) = event_publisher.publish_post_deleted(&post.id).await {
                tracing::warn!(error = %e, post_id = %post.id, "Failed to publish post deleted event");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use corkboard_db::repositories::SystemLogRepository;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_post(id: &str, is_pinned: bool) -> post::Model {
        post::Model {
            id: id.to_string(),
            name: "Alice".to_string(),
            batch: 1,
            message: "Hello".to_string(),
            image_url: None,
            facebook_url: "https://facebook.com/alice".to_string(),
            is_pinned,
            created_at: Utc::now().into(),
        }
    }

    fn audit_with_mock() -> AuditLogger {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        AuditLogger::new(SystemLogRepository::new(db))
    }

    #[tokio::test]
    async fn test_set_pinned() {
        let post = create_test_post("p1", false);
        let pinned = create_test_post("p1", true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .append_query_results([[pinned]])
                .into_connection(),
        );

        let service = ModerationService::new(PostRepository::new(db), audit_with_mock());
        let result = service.set_pinned("p1", true).await.unwrap();

        assert!(result.is_pinned);
    }

    #[tokio::test]
    async fn test_set_pinned_idempotent() {
        let post = create_test_post("p1", true);

        // Only the lookup is issued when the state already matches
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .into_connection(),
        );

        let service = ModerationService::new(PostRepository::new(db), audit_with_mock());
        let result = service.set_pinned("p1", true).await.unwrap();

        assert!(result.is_pinned);
    }

    #[tokio::test]
    async fn test_delete_post() {
        let post = create_test_post("p1", false);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let service = ModerationService::new(PostRepository::new(db), audit_with_mock());
        assert!(service.delete("p1").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_failure_propagates() {
        let post = create_test_post("p1", false);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .append_exec_errors([sea_orm::DbErr::Custom("connection reset".to_string())])
                .into_connection(),
        );

        let service = ModerationService::new(PostRepository::new(db), audit_with_mock());
        let result = service.delete("p1").await;

        assert!(matches!(
            result,
            Err(corkboard_common::AppError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_post() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let service = ModerationService::new(PostRepository::new(db), audit_with_mock());
        let result = service.delete("missing").await;

        assert!(matches!(
            result,
            Err(corkboard_common::AppError::PostNotFound(_))
        ));
    }
}
