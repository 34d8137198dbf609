//! Event publisher service.
//!
//! Provides an abstraction for publishing real-time board events.
//! The actual implementation is provided by the API crate (SSE broadcast).

use async_trait::async_trait;
use corkboard_common::AppResult;
use std::sync::Arc;

/// Trait for publishing real-time events.
///
/// Events carry only identifiers. Clients are expected to refetch the
/// board after any event rather than patch local state.
///
/// This allows the core services to publish events
/// without directly depending on the transport implementation.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a post created event.
    async fn publish_post_created(&self, id: &str) -> AppResult<()>;

    /// Publish a post updated event.
    async fn publish_post_updated(&self, id: &str) -> AppResult<()>;

    /// Publish a post deleted event.
    async fn publish_post_deleted(&self, id: &str) -> AppResult<()>;
}

/// A no-op implementation of `EventPublisher` for testing or when real-time
/// events are disabled.
#[derive(Clone, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish_post_created(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }

    async fn publish_post_updated(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }

    async fn publish_post_deleted(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }
}

/// Wrapper for boxed `EventPublisher` trait object.
pub type EventPublisherService = Arc<dyn EventPublisher>;
