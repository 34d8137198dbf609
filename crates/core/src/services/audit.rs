//! Audit logging to the `system_log` table.

use corkboard_common::{AppResult, IdGenerator};
use corkboard_db::{
    entities::system_log::{self, LogLevel},
    repositories::SystemLogRepository,
};
use sea_orm::Set;

/// Audit logger that records admin-visible events.
///
/// Writes are fire-and-forget: a failed insert must never fail the
/// operation being audited, so inserts run on a spawned task and
/// failures are only traced.
#[derive(Clone)]
pub struct AuditLogger {
    system_log_repo: SystemLogRepository,
    id_gen: IdGenerator,
}

impl AuditLogger {
    /// Create a new audit logger.
    #[must_use]
    pub const fn new(system_log_repo: SystemLogRepository) -> Self {
        Self {
            system_log_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Record an info-level event.
    pub fn info(&self, message: &str, metadata: serde_json::Value) {
        self.log(LogLevel::Info, message, metadata);
    }

    /// Record a warn-level event.
    pub fn warn(&self, message: &str, metadata: serde_json::Value) {
        self.log(LogLevel::Warn, message, metadata);
    }

    /// Record an error-level event.
    pub fn error(&self, message: &str, metadata: serde_json::Value) {
        self.log(LogLevel::Error, message, metadata);
    }

    fn log(&self, level: LogLevel, message: &str, metadata: serde_json::Value) {
        let model = system_log::ActiveModel {
            id: Set(self.id_gen.generate()),
            level: Set(level),
            message: Set(message.to_string()),
            metadata: Set(metadata),
            created_at: Set(chrono::Utc::now().into()),
        };

        let repo = self.system_log_repo.clone();
        let message = message.to_string();
        tokio::spawn(async move {
            if let Err(e) = repo.create(model).await {
                tracing::debug!(error = %e, message = %message, "Failed to write audit log entry");
            }
        });
    }

    /// Get recent audit entries, newest first.
    pub async fn recent(
        &self,
        level: Option<LogLevel>,
        limit: u64,
    ) -> AppResult<Vec<system_log::Model>> {
        self.system_log_repo.find_recent(level, limit).await
    }
}
