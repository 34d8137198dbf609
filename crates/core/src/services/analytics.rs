//! Board analytics for the admin dashboard.

use chrono::{DateTime, Duration, Utc};
use corkboard_common::AppResult;
use corkboard_db::repositories::{PostRepository, WebsiteVisitRepository};
use serde::Serialize;

/// Posts created on one day.
#[derive(Debug, Clone, Serialize)]
pub struct DailyCount {
    /// Day in `YYYY-MM-DD` form (UTC).
    pub date: String,
    /// Number of posts created that day.
    pub count: u64,
}

/// Aggregate board statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardAnalytics {
    /// Total number of posts on the board.
    pub total_posts: u64,
    /// Number of pinned posts.
    pub pinned_posts: u64,
    /// Posts from batch 1.
    pub batch_one_posts: u64,
    /// Posts from batch 2.
    pub batch_two_posts: u64,
    /// Posts per day over the last seven days, oldest first.
    pub posts_per_day: Vec<DailyCount>,
    /// Total recorded page visits.
    pub total_visits: u64,
}

/// Analytics service aggregating counts for the dashboard.
#[derive(Clone)]
pub struct AnalyticsService {
    post_repo: PostRepository,
    visit_repo: WebsiteVisitRepository,
}

impl AnalyticsService {
    /// Create a new analytics service.
    #[must_use]
    pub const fn new(post_repo: PostRepository, visit_repo: WebsiteVisitRepository) -> Self {
        Self {
            post_repo,
            visit_repo,
        }
    }

    /// Compute the dashboard summary.
    pub async fn summary(&self) -> AppResult<BoardAnalytics> {
        let total_posts = self.post_repo.count().await?;
        let pinned_posts = self.post_repo.count_pinned().await?;
        let batch_one_posts = self.post_repo.count_by_batch(1).await?;
        let batch_two_posts = self.post_repo.count_by_batch(2).await?;
        let posts_per_day = self.posts_per_day(Utc::now()).await?;
        let total_visits = self.visit_repo.count().await?;

        Ok(BoardAnalytics {
            total_posts,
            pinned_posts,
            batch_one_posts,
            batch_two_posts,
            posts_per_day,
            total_visits,
        })
    }

    /// Posts per day for the seven days ending at `now`, oldest first.
    ///
    /// Each day's count is the difference between cumulative counts at the
    /// day's start and end boundaries.
    async fn posts_per_day(&self, now: DateTime<Utc>) -> AppResult<Vec<DailyCount>> {
        let mut days = Vec::with_capacity(7);

        for offset in (0..7).rev() {
            let day_start = day_floor(now - Duration::days(offset));
            let day_end = day_start + Duration::days(1);

            let since_start = self.post_repo.count_created_since(day_start).await?;
            let since_end = if day_end > now {
                0
            } else {
                self.post_repo.count_created_since(day_end).await?
            };

            days.push(DailyCount {
                date: day_start.format("%Y-%m-%d").to_string(),
                count: since_start.saturating_sub(since_end),
            });
        }

        Ok(days)
    }
}

fn day_floor(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(at, |naive| naive.and_utc())
}
