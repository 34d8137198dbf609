//! Posting cooldown enforcement.

use chrono::{DateTime, Utc};
use corkboard_common::{AppError, AppResult};
use corkboard_db::repositories::RateLimitRepository;

/// The shared submitter key.
///
/// The board is anonymous, so every visitor shares one cooldown record.
/// Keeping the key in the schema leaves room for per-client keys later.
pub const ANONYMOUS_KEY: &str = "anonymous";

/// Compute the remaining cooldown in whole minutes, rounded up.
///
/// Returns `None` when the cooldown has elapsed.
#[must_use]
pub fn cooldown_remaining(
    last_post_at: DateTime<Utc>,
    now: DateTime<Utc>,
    cooldown_minutes: i64,
) -> Option<i64> {
    let cooldown_ms = cooldown_minutes * 60_000;
    let elapsed_ms = (now - last_post_at).num_milliseconds();
    if elapsed_ms >= cooldown_ms {
        return None;
    }
    // Ceiling division; remaining_ms is positive here
    let remaining_ms = cooldown_ms - elapsed_ms;
    Some((remaining_ms + 59_999) / 60_000)
}

/// Rate limit service enforcing the posting cooldown.
#[derive(Clone)]
pub struct RateLimitService {
    rate_limit_repo: RateLimitRepository,
    cooldown_minutes: i64,
}

impl RateLimitService {
    /// Create a new rate limit service.
    #[must_use]
    pub const fn new(rate_limit_repo: RateLimitRepository, cooldown_minutes: i64) -> Self {
        Self {
            rate_limit_repo,
            cooldown_minutes,
        }
    }

    /// Check whether a submitter may post now.
    ///
    /// Returns `AppError::RateLimited` with the remaining wait in whole
    /// minutes when the cooldown has not elapsed. A missing record means
    /// the submitter has never posted and may proceed.
    pub async fn check(&self, key: &str) -> AppResult<()> {
        let Some(record) = self.rate_limit_repo.find_by_key(key).await? else {
            return Ok(());
        };

        match cooldown_remaining(record.last_post_at.into(), Utc::now(), self.cooldown_minutes) {
            Some(wait_minutes) => Err(AppError::RateLimited { wait_minutes }),
            None => Ok(()),
        }
    }

    /// Record an accepted post for a submitter.
    pub async fn record(&self, key: &str) -> AppResult<()> {
        self.rate_limit_repo.touch(key, Utc::now()).await?;
        Ok(())
    }
}
