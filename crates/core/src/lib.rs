//! Core business logic for corkboard-rs.

pub mod services;

pub use services::*;
