//! Activity value type

use std::cmp::Ordering;

use contracts::Severity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How pressing an activity is; lower value sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum Priority {
    Urgent = i32::MIN,
    High = i32::MIN / 2,
    Medium = i32::MIN / 3,
    #[default]
    Default = 0,
    Low = i32::MAX / 2,
    Lowest = i32::MAX,
}

impl Priority {
    pub fn value(self) -> i32 {
        self as i32
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

/// Current state reported under a key
///
/// Equality and ordering ignore `uuid`, which is generated per instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    priority: Priority,
    key: String,
    message: String,
    severity: Severity,
    uuid: Uuid,
}

impl Activity {
    /// Create an activity with a fresh random id
    pub fn new(
        priority: Priority,
        key: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self::with_uuid(priority, key, message, severity, Uuid::new_v4())
    }

    /// Create an activity with an explicit id
    pub fn with_uuid(
        priority: Priority,
        key: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        uuid: Uuid,
    ) -> Self {
        Self {
            priority,
            key: key.into(),
            message: message.into(),
            severity,
            uuid,
        }
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl PartialEq for Activity {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
            && self.key == other.key
            && self.severity == other.severity
            && self.message == other.message
    }
}

impl Eq for Activity {}

impl PartialOrd for Activity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Activity {
    /// Priority, then key, then severity, then message
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.key.cmp(&other.key))
            .then_with(|| self.severity.cmp(&other.severity))
            .then_with(|| self.message.cmp(&other.message))
    }
}
