//! Rate limit repository.

use std::sync::Arc;

use crate::entities::{RateLimit, rate_limit};
use chrono::{DateTime, Utc};
use corkboard_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

/// Rate limit repository for database operations.
#[derive(Clone)]
pub struct RateLimitRepository {
    db: Arc<DatabaseConnection>,
}

impl RateLimitRepository {
    /// Create a new rate limit repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the record for a submitter key.
    pub async fn find_by_key(&self, key: &str) -> AppResult<Option<rate_limit::Model>> {
        RateLimit::find_by_id(key)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record an accepted post for a submitter key.
    ///
    /// Updates the existing record or creates one on first post. Not atomic
    /// with post insertion; the limiter is advisory only.
    pub async fn touch(&self, key: &str, at: DateTime<Utc>) -> AppResult<rate_limit::Model> {
        match self.find_by_key(key).await? {
            Some(existing) => {
                let mut model: rate_limit::ActiveModel = existing.into();
                model.last_post_at = Set(at.into());
                model
                    .update(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            }
            None => {
                let model = rate_limit::ActiveModel {
                    key: Set(key.to_string()),
                    last_post_at: Set(at.into()),
                };
                model
                    .insert(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_find_by_key_absent() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<rate_limit::Model>::new()])
                .into_connection(),
        );

        let repo = RateLimitRepository::new(db);
        let result = repo.find_by_key("anonymous").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_touch_creates_first_record() {
        let now = Utc::now();
        let created = rate_limit::Model {
            key: "anonymous".to_string(),
            last_post_at: now.into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // find_by_key: no record yet
                .append_query_results([Vec::<rate_limit::Model>::new()])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                // insert returns the created row
                .append_query_results([[created.clone()]])
                .into_connection(),
        );

        let repo = RateLimitRepository::new(db);
        let record = repo.touch("anonymous", now).await.unwrap();

        assert_eq!(record.key, "anonymous");
    }

    #[tokio::test]
    async fn test_touch_updates_existing_record() {
        let earlier = Utc::now() - chrono::Duration::minutes(10);
        let now = Utc::now();
        let existing = rate_limit::Model {
            key: "anonymous".to_string(),
            last_post_at: earlier.into(),
        };
        let updated = rate_limit::Model {
            key: "anonymous".to_string(),
            last_post_at: now.into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .append_query_results([[updated.clone()]])
                .into_connection(),
        );

        let repo = RateLimitRepository::new(db);
        let record = repo.touch("anonymous", now).await.unwrap();

        assert_eq!(record.last_post_at, updated.last_post_at);
    }
}
