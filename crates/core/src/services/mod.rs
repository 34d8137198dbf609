//! Business logic services.

#![allow(missing_docs)]

pub mod account;
pub mod analytics;
pub mod audit;
pub mod event_publisher;
pub mod moderation;
pub mod post;
pub mod rate_limit;
pub mod visit;

pub use account::{ADMIN_ROLE, AccountService, SignInResult};
pub use analytics::{AnalyticsService, BoardAnalytics, DailyCount};
pub use audit::AuditLogger;
pub use event_publisher::{EventPublisher, EventPublisherService, NoOpEventPublisher};
pub use moderation::ModerationService;
pub use post::{CreatePostInput, PostService, UploadedImage};
pub use rate_limit::{ANONYMOUS_KEY, RateLimitService, cooldown_remaining};
pub use visit::VisitService;
