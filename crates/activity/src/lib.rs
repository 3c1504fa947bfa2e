//! # Activity
//!
//! Keyed state projection for live conditions (faults, user activity).
//!
//! Unlike the append-only log stream, an [`ActivityContext`] keeps only the
//! latest [`Activity`] per key. Writing a value equal in content to the stored
//! one is a no-op; any other write replaces it and notifies subscribers.

mod activity;
mod context;

pub use activity::{Activity, Priority};
pub use context::ActivityContext;
