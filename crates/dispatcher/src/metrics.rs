//! Core metrics for observability

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Counters for a single logging core
#[derive(Debug, Default)]
pub struct CoreMetrics {
    /// Entries waiting for the worker
    queue_len: AtomicUsize,
    /// Entries that passed the severity gate
    accepted: AtomicU64,
    /// Entries dropped by the severity gate
    filtered: AtomicU64,
    /// Entries fully processed (sinks attempted, history recorded)
    delivered: AtomicU64,
    /// Failed sink deliveries
    sink_failures: AtomicU64,
    /// Entries processed with no registered sink
    empty_sink_notices: AtomicU64,
}

impl CoreMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current queue length
    pub fn queue_len(&self) -> usize {
        self.queue_len.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_queue_len(&self) -> usize {
        self.queue_len.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn dec_queue_len(&self) -> usize {
        self.queue_len.fetch_sub(1, Ordering::Relaxed).saturating_sub(1)
    }

    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_filtered(&self) {
        self.filtered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_sink_failures(&self) {
        self.sink_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn empty_sink_notices(&self) -> u64 {
        self.empty_sink_notices.load(Ordering::Relaxed)
    }

    pub(crate) fn inc_empty_sink_notices(&self) {
        self.empty_sink_notices.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queue_len: self.queue_len(),
            accepted: self.accepted(),
            filtered: self.filtered(),
            delivered: self.delivered(),
            sink_failures: self.sink_failures(),
            empty_sink_notices: self.empty_sink_notices(),
        }
    }
}

/// Snapshot of core metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub queue_len: usize,
    pub accepted: u64,
    pub filtered: u64,
    pub delivered: u64,
    pub sink_failures: u64,
    pub empty_sink_notices: u64,
}
