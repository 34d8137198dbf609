//! Database entities.

#![allow(missing_docs)]

pub mod post;
pub mod rate_limit;
pub mod system_log;
pub mod user;
pub mod user_role;
pub mod website_visit;

pub use post::Entity as Post;
pub use rate_limit::Entity as RateLimit;
pub use system_log::Entity as SystemLog;
pub use user::Entity as User;
pub use user_role::Entity as UserRole;
pub use website_visit::Entity as WebsiteVisit;
