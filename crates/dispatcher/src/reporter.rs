//! Error reporting port
//!
//! Sink failures never propagate back to the log call site. They are handed
//! to an [`ErrorReporter`] together with the identity of the failing sink.

use contracts::SinkError;
use tracing::{error, warn};

/// Process-wide error reporting collaborator
pub trait ErrorReporter: Send + Sync {
    /// A sink failed to accept an entry
    fn report_sink_failure(&self, sink_name: &str, error: &SinkError);

    /// Non-fatal diagnostic (e.g. entries processed with no sink registered)
    fn report_notice(&self, message: &str);
}

/// Default reporter writing to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report_sink_failure(&self, sink_name: &str, error: &SinkError) {
        error!(sink = %sink_name, error = %error, "Exception adding log entry to sink");
    }

    fn report_notice(&self, message: &str) {
        warn!("{message}");
    }
}
