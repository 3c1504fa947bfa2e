//! Worker - single consumer draining the core's queue
//!
//! The worker owns the receiving half of an unbounded channel and runs on a
//! dedicated thread, so producers never wait on sink I/O. Flush requests
//! travel through the same channel and are acknowledged only after every
//! entry queued before them has been processed.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc as std_mpsc, Arc};

use contracts::{LogEntry, LogSink, SinkError};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument, trace};

use crate::events::{CoreEvent, EventBus};
use crate::history::HistoryRing;
use crate::metrics::CoreMetrics;
use crate::registry::SinkSet;
use crate::reporter::ErrorReporter;

const EMPTY_SINK_SET_NOTICE: &str = "LoggingCore - Attempted to add entry with no sinks registered";

/// Message on the worker channel
pub(crate) enum Command {
    Entry(LogEntry),
    Flush(FlushAck),
}

/// Completion signal for a flush barrier
pub(crate) enum FlushAck {
    Blocking(std_mpsc::SyncSender<()>),
    Async(oneshot::Sender<()>),
}

impl FlushAck {
    fn complete(self) {
        match self {
            FlushAck::Blocking(tx) => {
                let _ = tx.send(());
            }
            FlushAck::Async(tx) => {
                let _ = tx.send(());
            }
        }
    }
}

/// State shared between the core handle and its worker
pub(crate) struct Shared {
    pub(crate) sinks: SinkSet,
    pub(crate) history: HistoryRing,
    pub(crate) events: EventBus,
    pub(crate) metrics: CoreMetrics,
    pub(crate) reporter: Arc<dyn ErrorReporter>,
}

impl Shared {
    /// Deliver one entry to every sink, then record and announce it
    fn process(&self, entry: LogEntry) {
        let sinks = self.sinks.snapshot();
        if sinks.is_empty() {
            self.metrics.inc_empty_sink_notices();
            observability::record_empty_sink_set();
            self.reporter.report_notice(EMPTY_SINK_SET_NOTICE);
        }

        for sink in &sinks {
            self.deliver_to(sink.as_ref(), &entry);
        }

        let sequence = self.history.push(entry.clone());
        self.metrics.inc_delivered();
        trace!(sequence, sinks = sinks.len(), "Entry processed");

        self.events.publish(CoreEvent::EntryAdded(entry));
    }

    fn deliver_to(&self, sink: &dyn LogSink, entry: &LogEntry) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| sink.deliver(entry)))
            .unwrap_or_else(|payload| {
                Err(SinkError::Panicked {
                    sink_name: sink.name().to_string(),
                    message: panic_message(payload.as_ref()),
                })
            });

        match result {
            Ok(()) => observability::record_sink_delivery(sink.name(), true),
            Err(e) => {
                self.metrics.inc_sink_failures();
                observability::record_sink_delivery(sink.name(), false);
                self.reporter.report_sink_failure(sink.name(), &e);
                // Continue with the remaining sinks
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Worker loop; returns once every sender is dropped and the queue is drained
#[instrument(name = "logcore_worker_loop", skip_all)]
pub(crate) fn run(shared: Arc<Shared>, mut rx: mpsc::UnboundedReceiver<Command>) {
    debug!("Logging worker started");

    let mut processed: u64 = 0;
    while let Some(command) = rx.blocking_recv() {
        match command {
            Command::Entry(entry) => {
                let depth = shared.metrics.dec_queue_len();
                observability::record_queue_depth(depth);
                shared.process(entry);
                processed += 1;
            }
            Command::Flush(ack) => ack.complete(),
        }
    }

    debug!(processed, "Logging worker stopped");
}
