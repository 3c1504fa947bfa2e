//! Logging core metrics
//!
//! Thin wrappers over the `metrics` facade. Without an installed recorder
//! every call is a no-op.

use contracts::Severity;
use metrics::{counter, gauge};

/// Record an entry that passed the severity gate
pub fn record_entry_accepted(severity: Severity) {
    counter!(
        "logcore_entries_accepted_total",
        "severity" => severity.as_str()
    )
    .increment(1);
}

/// Record an entry dropped by the severity gate
pub fn record_entry_filtered(severity: Severity) {
    counter!(
        "logcore_entries_filtered_total",
        "severity" => severity.as_str()
    )
    .increment(1);
}

/// Record one delivery attempt to a sink
pub fn record_sink_delivery(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "logcore_sink_deliveries_total",
        "sink" => sink_name.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Record an entry processed while no sink was registered
pub fn record_empty_sink_set() {
    counter!("logcore_empty_sink_set_total").increment(1);
}

/// Record a file rotation pass
pub fn record_rotation(success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!("logcore_rotations_total", "status" => status).increment(1);
}

/// Record a keyed activity change
pub fn record_activity_changed() {
    counter!("logcore_activity_changes_total").increment(1);
}

/// Record worker queue depth
pub fn record_queue_depth(depth: usize) {
    gauge!("logcore_queue_depth").set(depth as f64);
}
