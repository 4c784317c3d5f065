//! Host-clocked scheduling: trailing-edge debounce and per-frame
//! coalescing. Time is always passed in, never read, so a test can drive
//! a virtual clock.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Trailing-edge debouncer keyed by task.
///
/// Scheduling a key that is already pending pushes its deadline back; the
/// task becomes due once `delay` passes with no further scheduling.
#[derive(Debug, Clone)]
pub struct Debouncer<K> {
    delay: Duration,
    pending: HashMap<K, Instant>,
}

impl<K: Eq + Hash + Clone> Debouncer<K> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    pub fn schedule(&mut self, key: K, now: Instant) {
        self.pending.insert(key, now + self.delay);
    }

    /// Earliest deadline among pending tasks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// Remove and return every task whose deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Vec<K> {
        let due: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &due {
            self.pending.remove(key);
        }
        due
    }
}

/// Keeps only the latest value pushed between two frames.
#[derive(Debug, Clone, Default)]
pub struct FrameThrottle<T> {
    pending: Option<T>,
}

impl<T> FrameThrottle<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn push(&mut self, value: T) {
        self.pending = Some(value);
    }

    /// The value to process this frame, if any arrived since the last one.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }
}
