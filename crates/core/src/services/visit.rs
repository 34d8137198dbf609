//! Page visit tracking.

use corkboard_common::{AppResult, IdGenerator};
use corkboard_db::{entities::website_visit, repositories::WebsiteVisitRepository};
use sea_orm::Set;

/// Visit service recording page loads for analytics.
#[derive(Clone)]
pub struct VisitService {
    visit_repo: WebsiteVisitRepository,
    id_gen: IdGenerator,
}

impl VisitService {
    /// Create a new visit service.
    #[must_use]
    pub const fn new(visit_repo: WebsiteVisitRepository) -> Self {
        Self {
            visit_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Record a visit. Tracking is best-effort; callers may ignore failures.
    pub async fn track(&self, path: &str, user_agent: Option<&str>) -> AppResult<()> {
        let model = website_visit::ActiveModel {
            id: Set(self.id_gen.generate()),
            path: Set(path.to_string()),
            user_agent: Set(user_agent.map(ToString::to_string)),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.visit_repo.create(model).await?;
        Ok(())
    }
}
