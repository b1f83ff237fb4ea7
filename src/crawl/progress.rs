// src/crawl/progress.rs
// =============================================================================
// Progress reporting.
//
// The crawler pushes one ProgressEvent per completed page into a ProgressSink
// and never waits for an answer. A sink that fails is logged and ignored.
//
// Sinks:
// - any Fn(ProgressEvent) closure
// - ChannelSink: a bounded tokio mpsc channel drained by another task; a slow
//   consumer applies backpressure to the crawl
// - NoopSink: discards everything
// =============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::SinkError;

/// Sent once for every page that was fetched and extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub pages_processed: usize,
    pub current_depth: usize,
    pub current_url: String,
}

#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn emit(&self, event: ProgressEvent) -> Result<(), SinkError>;
}

#[async_trait]
impl<F> ProgressSink for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    async fn emit(&self, event: ProgressEvent) -> Result<(), SinkError> {
        self(event);
        Ok(())
    }
}

/// Forwards events into a bounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<ProgressEvent>,
}

impl ChannelSink {
    /// Creates the sink and the receiver its events arrive on.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ProgressSink for ChannelSink {
    async fn emit(&self, event: ProgressEvent) -> Result<(), SinkError> {
        self.tx.send(event).await.map_err(|_| SinkError::Closed)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

#[async_trait]
impl ProgressSink for NoopSink {
    async fn emit(&self, _event: ProgressEvent) -> Result<(), SinkError> {
        Ok(())
    }
}
