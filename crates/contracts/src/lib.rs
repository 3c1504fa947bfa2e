//! # Contracts
//!
//! Frozen interface contracts shared by the logging crates.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Severity Model
//! - Lower numeric value = more severe (`Emergency` = 0 … `Debug` = 7)
//! - An entry passes a threshold when `entry.severity() <= threshold`

mod config;
mod entry;
mod error;
mod severity;
mod sink;

pub use config::*;
pub use entry::{HistoryRecord, LogEntry};
pub use error::*;
pub use severity::Severity;
pub use sink::LogSink;
