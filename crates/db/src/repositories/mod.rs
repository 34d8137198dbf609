//! Database repositories.

#![allow(missing_docs)]

pub mod post;
pub mod rate_limit;
pub mod system_log;
pub mod user;
pub mod user_role;
pub mod website_visit;

pub use post::PostRepository;
pub use rate_limit::RateLimitRepository;
pub use system_log::SystemLogRepository;
pub use user::UserRepository;
pub use user_role::UserRoleRepository;
pub use website_visit::WebsiteVisitRepository;
