//! Change notifications published by the logging core
//!
//! Subscribers receive only events published after they subscribed; there is
//! no replay. A subscriber that falls more than the configured capacity behind
//! sees `RecvError::Lagged` and the publisher is never blocked.

use contracts::{LogEntry, Severity};
use tokio::sync::broadcast;

/// Event emitted after a core state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    /// An entry was delivered to every sink and recorded in history
    EntryAdded(LogEntry),
    /// The severity threshold changed
    SeverityChanged(Severity),
}

/// Fan-out point for [`CoreEvent`]s
#[derive(Debug)]
pub(crate) struct EventBus {
    tx: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// `capacity` must be non-zero
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<CoreEvent> {
        self.tx.subscribe()
    }

    /// Publish to current subscribers; having none is not an error
    pub(crate) fn publish(&self, event: CoreEvent) {
        let _ = self.tx.send(event);
    }
}
