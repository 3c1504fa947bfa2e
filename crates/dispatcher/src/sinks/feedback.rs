//! FeedbackSink - republishes entries to programmatic observers

use contracts::{LogEntry, LogSink, SinkError};
use tokio::sync::broadcast;

/// Sink that forwards every delivered entry to its subscribers
///
/// Subscribers only see entries delivered after they subscribed.
pub struct FeedbackSink {
    name: String,
    tx: broadcast::Sender<LogEntry>,
}

impl FeedbackSink {
    /// Create a sink buffering up to `capacity` entries per subscriber
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            name: name.into(),
            tx,
        }
    }

    /// Receive entries delivered from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.tx.subscribe()
    }
}

impl LogSink for FeedbackSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn deliver(&self, entry: &LogEntry) -> Result<(), SinkError> {
        // No subscribers is fine
        let _ = self.tx.send(entry.clone());
        Ok(())
    }
}
