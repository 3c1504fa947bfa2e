//! History ring - most recent processed entries
//!
//! Backed by a fixed-capacity `HeapRb`; inserting into a full ring evicts the
//! oldest record. Sequence numbers are global to the ring and survive `clear`.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use contracts::{HistoryRecord, LogEntry};
use ringbuf::{traits::*, HeapRb};

struct RingState {
    records: HeapRb<HistoryRecord>,
    next_sequence: u64,
}

/// Fixed-capacity record of delivered entries
pub(crate) struct HistoryRing {
    state: Mutex<RingState>,
    capacity: usize,
}

impl fmt::Debug for HistoryRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryRing")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

impl HistoryRing {
    /// `capacity` must be non-zero
    pub(crate) fn new(capacity: usize) -> Self {
        Self::starting_at(capacity, 0)
    }

    pub(crate) fn starting_at(capacity: usize, first_sequence: u64) -> Self {
        Self {
            state: Mutex::new(RingState {
                records: HeapRb::new(capacity),
                next_sequence: first_sequence,
            }),
            capacity,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().records.occupied_len()
    }

    /// Append an entry, evicting the oldest when full. Returns its sequence.
    pub(crate) fn push(&self, entry: LogEntry) -> u64 {
        let mut state = self.lock();
        let sequence = state.next_sequence;
        state.next_sequence = sequence.wrapping_add(1);
        state.records.push_overwrite(HistoryRecord { sequence, entry });
        sequence
    }

    /// Oldest first
    pub(crate) fn snapshot(&self) -> Vec<HistoryRecord> {
        self.lock().records.iter().cloned().collect()
    }

    pub(crate) fn clear(&self) {
        let mut state = self.lock();
        let _ = state.records.pop_iter().count();
    }
}
