//! Sink set - registered delivery targets
//!
//! Identity is the `Arc` allocation: registering the same `Arc` twice is a
//! no-op. Readers take a snapshot and deliver outside the lock.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use contracts::LogSink;

#[derive(Default)]
pub(crate) struct SinkSet {
    sinks: Mutex<Vec<Arc<dyn LogSink>>>,
}

impl fmt::Debug for SinkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkSet").field("len", &self.len()).finish()
    }
}

fn same_allocation<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl SinkSet {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn LogSink>>> {
        self.sinks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns false if already registered
    pub(crate) fn insert(&self, sink: Arc<dyn LogSink>) -> bool {
        let mut sinks = self.lock();
        if sinks.iter().any(|s| same_allocation(s, &sink)) {
            return false;
        }
        sinks.push(sink);
        true
    }

    /// Returns false if not registered
    pub(crate) fn remove<S: LogSink + ?Sized>(&self, sink: &Arc<S>) -> bool {
        let mut sinks = self.lock();
        match sinks.iter().position(|s| same_allocation(s, sink)) {
            Some(index) => {
                sinks.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<Arc<dyn LogSink>> {
        self.lock().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{LogEntry, SinkError};

    struct NullSink;

    impl LogSink for NullSink {
        fn name(&self) -> &str {
            "null"
        }

        fn deliver(&self, _entry: &LogEntry) -> Result<(), SinkError> {
            Ok(())
        }
    }

    #[test]
    fn test_set_semantics() {
        let set = SinkSet::default();
        let a = Arc::new(NullSink);
        let b = Arc::new(NullSink);

        assert!(set.insert(a.clone()));
        assert!(!set.insert(a.clone()));
        assert!(set.insert(b.clone()));
        assert_eq!(set.len(), 2);

        assert!(set.remove(&a));
        assert!(!set.remove(&a));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_through_trait_object() {
        let set = SinkSet::default();
        let sink: Arc<dyn LogSink> = Arc::new(NullSink);
        assert!(set.insert(sink.clone()));
        assert!(set.remove(&sink));
        assert!(set.snapshot().is_empty());
    }
}
