//! LoggingCore - severity gate, worker queue and sink fan-out

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{mpsc as std_mpsc, Arc};
use std::thread::{self, JoinHandle, ThreadId};

use contracts::{
    HistoryRecord, LogEntry, LogSink, LoggingConfig, Severity, DEFAULT_EVENT_CAPACITY,
    DEFAULT_HISTORY_CAPACITY,
};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

use crate::error::DispatcherError;
use crate::events::{CoreEvent, EventBus};
use crate::history::HistoryRing;
use crate::metrics::{CoreMetrics, MetricsSnapshot};
use crate::registry::SinkSet;
use crate::reporter::{ErrorReporter, TracingErrorReporter};
use crate::sinks::{ConsoleSink, EventLogSink, RotatingFileSink};
use crate::worker::{self, Command, FlushAck, Shared};

/// Builder for creating a LoggingCore
pub struct LoggingCoreBuilder {
    severity_threshold: Severity,
    history_capacity: usize,
    event_capacity: usize,
    reporter: Arc<dyn ErrorReporter>,
    sinks: Vec<Arc<dyn LogSink>>,
}

impl Default for LoggingCoreBuilder {
    fn default() -> Self {
        Self {
            severity_threshold: Severity::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            reporter: Arc::new(TracingErrorReporter),
            sinks: Vec::new(),
        }
    }
}

impl LoggingCoreBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Least severe level that still passes the gate
    pub fn severity_threshold(mut self, threshold: Severity) -> Self {
        self.severity_threshold = threshold;
        self
    }

    /// Number of processed entries kept in history
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Per-subscriber event buffer
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Collaborator receiving sink failures and notices
    pub fn error_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Register a sink before the worker starts
    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Validate settings and start the worker
    #[instrument(
        name = "logging_core_build",
        skip(self),
        fields(
            threshold = %self.severity_threshold,
            history_capacity = self.history_capacity,
            sinks = self.sinks.len()
        )
    )]
    pub fn build(self) -> Result<LoggingCore, DispatcherError> {
        if self.history_capacity == 0 {
            return Err(DispatcherError::configuration(
                "history_capacity",
                "must be greater than 0",
            ));
        }
        if self.event_capacity == 0 {
            return Err(DispatcherError::configuration(
                "event_capacity",
                "must be greater than 0",
            ));
        }

        let sinks = SinkSet::default();
        for sink in self.sinks {
            if !sinks.insert(sink) {
                debug!("Duplicate sink registration ignored");
            }
        }

        let shared = Arc::new(Shared {
            sinks,
            history: HistoryRing::new(self.history_capacity),
            events: EventBus::new(self.event_capacity),
            metrics: CoreMetrics::new(),
            reporter: self.reporter,
        });

        let (tx, rx) = mpsc::unbounded_channel();
        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("logcore-worker".to_string())
            .spawn(move || worker::run(worker_shared, rx))
            .map_err(DispatcherError::WorkerSpawn)?;

        info!("Logging core started");

        Ok(LoggingCore {
            threshold: AtomicU8::new(self.severity_threshold.as_u8()),
            worker_id: worker.thread().id(),
            tx,
            shared,
            worker,
        })
    }
}

/// Asynchronous logging dispatch engine
///
/// Producers call [`LoggingCore::add_entry`] from any thread; a single
/// background worker delivers entries to every registered sink in submission
/// order, records them in the history ring and announces them to subscribers.
pub struct LoggingCore {
    threshold: AtomicU8,
    worker_id: ThreadId,
    tx: mpsc::UnboundedSender<Command>,
    shared: Arc<Shared>,
    worker: JoinHandle<()>,
}

impl LoggingCore {
    /// Create a core with default settings and no sinks
    pub fn new() -> Result<Self, DispatcherError> {
        LoggingCoreBuilder::new().build()
    }

    /// Start configuring a core
    pub fn builder() -> LoggingCoreBuilder {
        LoggingCoreBuilder::new()
    }

    /// Submit an entry
    ///
    /// Entries less severe than the threshold are dropped here; the check is
    /// not repeated when the worker dequeues. Never blocks on sink I/O.
    pub fn add_entry(&self, entry: LogEntry) {
        let severity = entry.severity();
        if !severity.passes(self.severity_threshold()) {
            self.shared.metrics.inc_filtered();
            observability::record_entry_filtered(severity);
            return;
        }

        self.shared.metrics.inc_accepted();
        observability::record_entry_accepted(severity);
        let depth = self.shared.metrics.inc_queue_len();
        observability::record_queue_depth(depth);

        if self.tx.send(Command::Entry(entry)).is_err() {
            self.shared.metrics.dec_queue_len();
            error!("Logging worker stopped, entry dropped");
        }
    }

    /// Submit a new entry stamped with the current time
    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        self.add_entry(LogEntry::new(severity, message));
    }

    /// Current severity threshold
    pub fn severity_threshold(&self) -> Severity {
        Severity::from_u8(self.threshold.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Change the severity threshold
    ///
    /// Emits [`CoreEvent::SeverityChanged`] only if the value changed.
    pub fn set_severity_threshold(&self, threshold: Severity) {
        let previous = self.threshold.swap(threshold.as_u8(), Ordering::AcqRel);
        if previous == threshold.as_u8() {
            return;
        }

        debug!(threshold = %threshold, "Severity threshold changed");
        self.shared
            .events
            .publish(CoreEvent::SeverityChanged(threshold));
    }

    /// Register a sink. Returns false if it was already registered.
    pub fn add_sink(&self, sink: Arc<dyn LogSink>) -> bool {
        let name = sink.name().to_string();
        let added = self.shared.sinks.insert(sink);
        if added {
            debug!(sink = %name, "Sink registered");
        }
        added
    }

    /// Unregister a sink. Returns false if it was not registered.
    pub fn remove_sink<S: LogSink + ?Sized>(&self, sink: &Arc<S>) -> bool {
        let removed = self.shared.sinks.remove(sink);
        if removed {
            debug!(sink = %sink.name(), "Sink removed");
        }
        removed
    }

    /// Number of registered sinks
    pub fn sink_count(&self) -> usize {
        self.shared.sinks.len()
    }

    /// Processed entries, oldest first, at most `history_capacity` of them
    pub fn history(&self) -> Vec<HistoryRecord> {
        self.shared.history.snapshot()
    }

    /// Capacity of the history ring
    pub fn history_capacity(&self) -> usize {
        self.shared.history.capacity()
    }

    /// Discard retained history; sequence numbering continues
    pub fn clear_history(&self) {
        self.shared.history.clear();
    }

    /// Subscribe to entry and threshold events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> {
        self.shared.events.subscribe()
    }

    /// Snapshot of the core counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.shared.metrics.snapshot()
    }

    /// Block until every entry submitted before this call has been processed
    ///
    /// Returns immediately when called from a sink running on the worker.
    pub fn flush(&self) {
        if thread::current().id() == self.worker_id {
            warn!("flush called from the logging worker, ignored");
            return;
        }

        let (ack_tx, ack_rx) = std_mpsc::sync_channel(1);
        if self.tx.send(Command::Flush(FlushAck::Blocking(ack_tx))).is_err() {
            return;
        }
        let _ = ack_rx.recv();
    }

    /// Async variant of [`LoggingCore::flush`]
    pub async fn flush_async(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(FlushAck::Async(ack_tx))).is_err() {
            return;
        }
        let _ = ack_rx.await;
    }

    /// Drain the queue, stop the worker and wait for it
    #[instrument(name = "logging_core_shutdown", skip(self))]
    pub fn shutdown(self) {
        let Self { tx, worker, .. } = self;
        // Dropping the only sender lets the worker finish the queue and exit
        drop(tx);
        if worker.join().is_err() {
            error!("Logging worker panicked");
        }
        info!("Logging core shutdown complete");
    }
}

/// Build a core from configuration and register the configured sinks
#[instrument(name = "logging_core_create", skip(config))]
pub fn create_core(config: &LoggingConfig) -> Result<LoggingCore, DispatcherError> {
    let mut builder = LoggingCore::builder()
        .severity_threshold(config.severity_threshold)
        .history_capacity(config.history_capacity)
        .event_capacity(config.event_capacity);

    if config.console.enabled {
        builder = builder.sink(Arc::new(ConsoleSink::from_stream(
            "console",
            config.console.stream,
        )));
    }

    if let Some(file_config) = &config.file {
        let sink = RotatingFileSink::new("file", file_config.clone())
            .map_err(|e| DispatcherError::sink_creation("file", e))?;
        builder = builder.sink(Arc::new(sink));
    }

    if let Some(event_log) = &config.event_log {
        let sink = EventLogSink::new(&event_log.source)
            .map_err(|e| DispatcherError::sink_creation("event_log", e))?;
        builder = builder.sink(Arc::new(sink));
    }

    builder.build()
}
