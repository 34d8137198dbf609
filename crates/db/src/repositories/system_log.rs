//! System log repository.

use std::sync::Arc;

use crate::entities::{SystemLog, system_log};
use corkboard_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// System log repository for database operations.
#[derive(Clone)]
pub struct SystemLogRepository {
    db: Arc<DatabaseConnection>,
}

impl SystemLogRepository {
    /// Create a new system log repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Append a log entry.
    pub async fn create(&self, model: system_log::ActiveModel) -> AppResult<system_log::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get log entries, newest first, optionally filtered by level.
    pub async fn find_recent(
        &self,
        level: Option<system_log::LogLevel>,
        limit: u64,
    ) -> AppResult<Vec<system_log::Model>> {
        let mut query = SystemLog::find()
            .order_by_desc(system_log::Column::CreatedAt)
            .limit(limit);

        if let Some(level) = level {
            query = query.filter(system_log::Column::Level.eq(level));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn create_test_entry(id: &str, level: system_log::LogLevel) -> system_log::Model {
        system_log::Model {
            id: id.to_string(),
            level,
            message: "Admin deleted a post".to_string(),
            metadata: json!({ "postId": "p1" }),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_recent() {
        let entry = create_test_entry("l1", system_log::LogLevel::Info);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[entry.clone()]])
                .into_connection(),
        );

        let repo = SystemLogRepository::new(db);
        let entries = repo.find_recent(None, 100).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, system_log::LogLevel::Info);
    }

    #[tokio::test]
    async fn test_find_recent_filtered() {
        let entry = create_test_entry("l2", system_log::LogLevel::Warn);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[entry.clone()]])
                .into_connection(),
        );

        let repo = SystemLogRepository::new(db);
        let entries = repo
            .find_recent(Some(system_log::LogLevel::Warn), 10)
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "Admin deleted a post");
    }
}
