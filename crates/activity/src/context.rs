//! ActivityContext - latest activity per key

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tokio::sync::broadcast;
use tracing::debug;

use crate::activity::Activity;

const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Last-write-wins map from key to [`Activity`]
pub struct ActivityContext {
    activities: Mutex<HashMap<String, Activity>>,
    changes: broadcast::Sender<Activity>,
}

impl Default for ActivityContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityContext {
    pub fn new() -> Self {
        Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Buffer up to `capacity` changes per subscriber
    pub fn with_event_capacity(capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(capacity.max(1));
        Self {
            activities: Mutex::new(HashMap::new()),
            changes,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Activity>> {
        self.activities.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `activity` under its key
    ///
    /// Returns false, and notifies nobody, if the stored activity is equal
    /// in content.
    ///
    /// Notifications are sent after the map lock is released, so concurrent
    /// writers to one key may notify in a different order than they stored.
    /// [`ActivityContext::get`] always reflects the stored winner.
    pub fn log_activity(&self, activity: Activity) -> bool {
        {
            let mut activities = self.lock();
            if activities.get(activity.key()) == Some(&activity) {
                return false;
            }
            activities.insert(activity.key().to_string(), activity.clone());
        }

        debug!(
            key = %activity.key(),
            priority = ?activity.priority(),
            "Activity changed"
        );
        observability::record_activity_changed();
        let _ = self.changes.send(activity);
        true
    }

    /// Current activity for `key`
    pub fn get(&self, key: &str) -> Option<Activity> {
        self.lock().get(key).cloned()
    }

    /// Snapshot of all activities, most pressing first
    pub fn activities(&self) -> Vec<Activity> {
        let mut snapshot: Vec<Activity> = self.lock().values().cloned().collect();
        snapshot.sort();
        snapshot
    }

    /// The single most pressing live activity
    pub fn most_pressing(&self) -> Option<Activity> {
        self.lock().values().min().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Receive changes made from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Activity> {
        self.changes.subscribe()
    }
}
