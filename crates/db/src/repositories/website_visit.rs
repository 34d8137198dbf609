//! Website visit repository.

use std::sync::Arc;

use crate::entities::{WebsiteVisit, website_visit};
use corkboard_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait};

/// Website visit repository for database operations.
#[derive(Clone)]
pub struct WebsiteVisitRepository {
    db: Arc<DatabaseConnection>,
}

impl WebsiteVisitRepository {
    /// Create a new website visit repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record a visit.
    pub async fn create(
        &self,
        model: website_visit::ActiveModel,
    ) -> AppResult<website_visit::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all recorded visits.
    pub async fn count(&self) -> AppResult<u64> {
        WebsiteVisit::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
