//! Server-Sent Events (SSE) for real-time board updates.
//!
//! Events carry only post identifiers; clients refetch the board feed
//! after any event instead of patching local state.

#![allow(missing_docs)]

use std::convert::Infallible;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use corkboard_common::AppResult;
use corkboard_core::EventPublisher;
use futures::stream::{self, Stream};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use crate::middleware::AppState;

/// SSE event types.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SseEvent {
    /// A new post was created.
    PostCreated { id: String },
    /// A post was updated (pinned or unpinned).
    PostUpdated { id: String },
    /// A post was deleted.
    PostDeleted { id: String },
    /// Connection established.
    Connected,
}

/// SSE broadcast channel for board events.
#[derive(Clone)]
pub struct SseBroadcaster {
    board: broadcast::Sender<SseEvent>,
}

impl SseBroadcaster {
    /// Create a new SSE broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (board, _) = broadcast::channel(1000);
        Self { board }
    }

    /// Subscribe to board events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SseEvent> {
        self.board.subscribe()
    }

    /// Broadcast an event to all connected clients.
    ///
    /// Send errors only mean no client is connected.
    pub fn broadcast(&self, event: SseEvent) {
        let _ = self.board.send(event);
    }

    /// Number of connected subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.board.receiver_count()
    }
}

impl Default for SseBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for SseBroadcaster {
    async fn publish_post_created(&self, id: &str) -> AppResult<()> {
        self.broadcast(SseEvent::PostCreated { id: id.to_string() });
        Ok(())
    }

    async fn publish_post_updated(&self, id: &str) -> AppResult<()> {
        self.broadcast(SseEvent::PostUpdated { id: id.to_string() });
        Ok(())
    }

    async fn publish_post_deleted(&self, id: &str) -> AppResult<()> {
        self.broadcast(SseEvent::PostDeleted { id: id.to_string() });
        Ok(())
    }
}

/// Board SSE stream.
async fn board_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.sse_broadcaster.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| {
        result.ok().map(|event| {
            Ok(Event::default()
                .json_data(&event)
                .unwrap_or_else(|_| Event::default().data("error")))
        })
    });

    // Add initial connected event
    let initial = stream::once(async {
        Ok(Event::default()
            .json_data(&SseEvent::Connected)
            .unwrap_or_else(|_| Event::default().data("connected")))
    });

    Sse::new(initial.chain(stream)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    )
}

/// Create the SSE router.
pub fn router() -> Router<AppState> {
    Router::new().route("/posts", get(board_stream))
}
