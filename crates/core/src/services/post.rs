//! Post service: board feed and anonymous submissions.

use std::sync::Arc;

use corkboard_common::{
    AppError, AppResult, IdGenerator, StorageBackend, generate_storage_key,
};
use corkboard_db::{entities::post, repositories::PostRepository};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::Set;
use validator::Validate;

use super::{
    audit::AuditLogger,
    event_publisher::EventPublisherService,
    rate_limit::{ANONYMOUS_KEY, RateLimitService},
};

// facebook.com allows a www. or m. host prefix; fb.com only www.
#[allow(clippy::unwrap_used)]
static FACEBOOK_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://((www\.|m\.)?facebook\.com|(www\.)?fb\.com)/.*").unwrap()
});

/// An image attached to a submission.
pub struct UploadedImage {
    /// Original filename as sent by the client.
    pub file_name: String,
    /// MIME content type.
    pub content_type: String,
    /// Raw file bytes.
    pub data: Vec<u8>,
}

/// Input for creating a post.
#[derive(Debug, Validate)]
pub struct CreatePostInput {
    /// Display name shown on the card.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Batch the author belongs to.
    #[validate(range(min = 1, max = 2))]
    pub batch: i32,
    /// Message body.
    #[validate(length(min = 1, max = 1000))]
    pub message: String,
    /// Facebook profile URL of the author.
    #[validate(length(min = 1, max = 500))]
    pub facebook_url: String,
}

/// Post service for the board feed and submissions.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    rate_limiter: RateLimitService,
    storage: Arc<dyn StorageBackend>,
    audit: AuditLogger,
    id_gen: IdGenerator,
    max_image_bytes: u64,
    event_publisher: Option<EventPublisherService>,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        rate_limiter: RateLimitService,
        storage: Arc<dyn StorageBackend>,
        audit: AuditLogger,
        max_image_bytes: u64,
    ) -> Self {
        Self {
            post_repo,
            rate_limiter,
            storage,
            audit,
            id_gen: IdGenerator::new(),
            max_image_bytes,
            event_publisher: None,
        }
    }

    /// Set the event publisher.
    pub fn set_event_publisher(&mut self, event_publisher: EventPublisherService) {
        self.event_publisher = Some(event_publisher);
    }

    /// Get the board feed: pinned posts first, then newest first.
    pub async fn list(&self) -> AppResult<Vec<post::Model>> {
        self.post_repo.find_all_board_order().await
    }

    /// Get all posts newest first, ignoring pins (admin table order).
    pub async fn list_recent(&self) -> AppResult<Vec<post::Model>> {
        self.post_repo.find_all_recent().await
    }

    /// Get a post by ID.
    pub async fn get(&self, id: &str) -> AppResult<post::Model> {
        self.post_repo.get_by_id(id).await
    }

    /// Create a new post from an anonymous submission.
    ///
    /// Enforces field validation, the image size cap, and the posting
    /// cooldown. The cooldown record is updated only after the post is
    /// stored, so a rejected submission never consumes the cooldown.
    pub async fn create(
        &self,
        input: CreatePostInput,
        image: Option<UploadedImage>,
    ) -> AppResult<post::Model> {
        // Trim before validating so whitespace-only fields are rejected
        let input = CreatePostInput {
            name: input.name.trim().to_string(),
            batch: input.batch,
            message: input.message.trim().to_string(),
            facebook_url: input.facebook_url.trim().to_string(),
        };
        input.validate()?;

        if !FACEBOOK_URL_RE.is_match(&input.facebook_url) {
            return Err(AppError::BadRequest(
                "A valid Facebook profile URL is required".to_string(),
            ));
        }

        if let Some(ref image) = image {
            if image.data.len() as u64 > self.max_image_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "Image exceeds the {} KiB limit",
                    self.max_image_bytes / 1024
                )));
            }
            if !image.content_type.starts_with("image/") {
                return Err(AppError::BadRequest(
                    "Attachment must be an image".to_string(),
                ));
            }
        }

        self.rate_limiter.check(ANONYMOUS_KEY).await?;

        // Upload before insert so a failed upload leaves no orphan row
        let image_url = if let Some(image) = image {
            let key = generate_storage_key(&image.file_name);
            let uploaded = match self
                .storage
                .upload(&key, &image.data, &image.content_type)
                .await
            {
                Ok(uploaded) => uploaded,
                Err(e) => {
                    self.audit.error(
                        "Error uploading image",
                        serde_json::json!({ "error": e.to_string() }),
                    );
                    return Err(e);
                }
            };
            Some(uploaded.url)
        } else {
            None
        };

        let id = self.id_gen.generate();
        let model = post::ActiveModel {
            id: Set(id),
            name: Set(input.name),
            batch: Set(input.batch),
            message: Set(input.message),
            image_url: Set(image_url),
            facebook_url: Set(input.facebook_url),
            is_pinned: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };

        let post = match self.post_repo.create(model).await {
            Ok(post) => post,
            Err(e) => {
                self.audit.error(
                    "Error creating post",
                    serde_json::json!({ "error": e.to_string() }),
                );
                return Err(e);
            }
        };

        if let Err(e) = self.rate_limiter.record(ANONYMOUS_KEY).await {
            tracing::warn!(error = %e, post_id = %post.id, "Failed to record posting cooldown");
        }

        if let Some(ref event_publisher) = self.event_publisher {
            if let Err(e) = event_publisher.publish_post_created(&post.id).await {
                tracing::warn!(error = %e, post_id = %post.id, "Failed to publish post created event");
            }
        }

        Ok(post)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use corkboard_common::UploadedFile;
    use corkboard_db::entities::rate_limit;
    use corkboard_db::repositories::{RateLimitRepository, SystemLogRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    struct StubStorage;

    #[async_trait]
    impl StorageBackend for StubStorage {
        async fn upload(
            &self,
            key: &str,
            data: &[u8],
            content_type: &str,
        ) -> AppResult<UploadedFile> {
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
            Ok(true)
        }
    }

    fn service_with(db: Arc<sea_orm::DatabaseConnection>) -> PostService {
        let audit_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );
        PostService::new(
            PostRepository::new(Arc::clone(&db)),
            RateLimitService::new(RateLimitRepository::new(db), 5),
            Arc::new(StubStorage),
            AuditLogger::new(SystemLogRepository::new(audit_db)),
            100 * 1024,
        )
    }

    #[tokio::test]
    async fn test_image_over_cap_rejected_before_any_query() {
        // Mock db with nothing queued: any query would fail the test
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        let image = UploadedImage {
            file_name: "big.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![0; 100 * 1024 + 1],
        };
        let result = service.create(valid_input(), Some(image)).await;

        assert!(matches!(result, Err(AppError::PayloadTooLarge(_))));
    }

    #[tokio::test]
    async fn test_non_image_attachment_rejected() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        let image = UploadedImage {
            file_name: "notes.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: vec![0; 16],
        };
        let result = service.create(valid_input(), Some(image)).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_without_image() {
        let created = post::Model {
            id: "p1".to_string(),
            name: "Alice".to_string(),
            batch: 1,
            message: "Hello corkboard!".to_string(),
            image_url: None,
            facebook_url: "https://facebook.com/alice.profile".to_string(),
            is_pinned: false,
            created_at: Utc::now().into(),
        };
        let record = rate_limit::Model {
            key: ANONYMOUS_KEY.to_string(),
            last_post_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // cooldown check: no record
                .append_query_results([Vec::<rate_limit::Model>::new()])
                // post insert
                .append_query_results([[created.clone()]])
                // cooldown record: find then insert
                .append_query_results([Vec::<rate_limit::Model>::new()])
                .append_query_results([[record]])
                .into_connection(),
        );
        let service = service_with(db);

        let post = service.create(valid_input(), None).await.unwrap();

        assert_eq!(post.name, "Alice");
        assert!(!post.is_pinned);
        assert!(post.image_url.is_none());
    }

    fn valid_input() -> CreatePostInput {
        CreatePostInput {
            name: "Alice".to_string(),
            batch: 1,
            message: "Hello corkboard!".to_string(),
            facebook_url: "https://facebook.com/alice.profile".to_string(),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut input = valid_input();
        input.name = String::new();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_long_message_rejected() {
        let mut input = valid_input();
        input.message = "x".repeat(1001);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_batch_out_of_range_rejected() {
        let mut input = valid_input();
        input.batch = 3;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_facebook_url_variants() {
        for url in [
            "https://facebook.com/someone",
            "https://facebook.com/",
            "https://www.facebook.com/someone",
            "https://m.facebook.com/profile.php?id=1234",
            "http://fb.com/someone",
            "https://www.fb.com/someone",
            "HTTPS://FACEBOOK.COM/SOMEONE",
        ] {
            assert!(FACEBOOK_URL_RE.is_match(url), "should accept {url}");
        }
    }

    #[test]
    fn test_facebook_url_rejects_other_hosts() {
        for url in [
            "https://example.com/facebook.com",
            "https://twitter.com/someone",
            "facebook.com/someone",
            "https://m.fb.com/someone",
        ] {
            assert!(!FACEBOOK_URL_RE.is_match(url), "should reject {url}");
        }
    }

    #[tokio::test]
    async fn test_whitespace_only_name_rejected() {
        // No queries queued: rejection must happen before the cooldown check
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        let mut input = valid_input();
        input.name = "   ".to_string();
        let result = service.create(input, None).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_whitespace_only_message_rejected() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(db);

        let mut input = valid_input();
        input.message = "  \n ".to_string();
        let result = service.create(input, None).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    struct FailingStorage;

    #[async_trait]
    impl StorageBackend for FailingStorage {
        async fn upload(
            &self,
            _key: &str,
            _data: &[u8],
            _content_type: &str,
        ) -> AppResult<UploadedFile> {
            Err(AppError::Storage("disk full".to_string()))
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            key.to_string()
        }

        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_upload_failure_aborts_submission() {
        // Cooldown check passes, then the upload fails; no insert happens
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<rate_limit::Model>::new()])
                .into_connection(),
        );
        let audit_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = PostService::new(
            PostRepository::new(Arc::clone(&db)),
            RateLimitService::new(RateLimitRepository::new(db), 5),
            Arc::new(FailingStorage),
            AuditLogger::new(SystemLogRepository::new(audit_db)),
            100 * 1024,
        );

        let image = UploadedImage {
            file_name: "pic.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![0; 16],
        };
        let result = service.create(valid_input(), Some(image)).await;

        assert!(matches!(result, Err(AppError::Storage(_))));
    }
}
