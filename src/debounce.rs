//! Trailing-edge debounce channels for coalescing rapid edits.
//!
//! A channel holds at most one pending value and one deadline. Every push replaces the value and
//! pushes the deadline back, so only the last value of a burst survives, and it is handed out
//! exactly once when the caller polls at or after the deadline. Time is passed in by the caller:
//! nothing here spawns timers, which keeps the host event loop in charge of when flushes happen.

use indexmap::IndexMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Quiet period used when none is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

#[derive(Debug)]
/// A single debounce channel.
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    #[must_use]
    /// An idle channel with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    /// The quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Store `value` as the pending value and restart the quiet period from `now`.
    ///
    /// Returns the value it replaced, if any, which will now never be delivered.
    pub fn push(&mut self, value: T, now: Instant) -> Option<T> {
        let deadline = now + self.delay;
        self.pending
            .replace(Pending { value, deadline })
            .map(|dropped| dropped.value)
    }

    /// Take the pending value if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline);
        if due {
            self.flush()
        } else {
            None
        }
    }

    /// Take the pending value immediately, regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    #[must_use]
    /// When the pending value becomes deliverable, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    #[must_use]
    /// Whether a value is waiting to be delivered.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug)]
/// Independent debounce channels keyed by `K`.
///
/// Pushing to one key never restarts or drops another key's pending value.
pub struct KeyedDebouncer<K, T> {
    delay: Duration,
    channels: IndexMap<K, Debouncer<T>>,
}

impl<K: Eq + Hash + Clone, T> KeyedDebouncer<K, T> {
    #[must_use]
    /// No channels yet; each key gets one on first push.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            channels: IndexMap::new(),
        }
    }

    /// Push to the channel for `key`, returning the value it replaced.
    pub fn push(&mut self, key: K, value: T, now: Instant) -> Option<T> {
        let delay = self.delay;
        self.channels
            .entry(key)
            .or_insert_with(|| Debouncer::new(delay))
            .push(value, now)
    }

    /// Take every value whose quiet period has elapsed by `now`, earliest deadline first.
    pub fn poll(&mut self, now: Instant) -> Vec<(K, T)> {
        let mut ready: Vec<(Instant, K)> = self
            .channels
            .iter()
            .filter_map(|(key, channel)| {
                channel
                    .deadline()
                    .filter(|deadline| *deadline <= now)
                    .map(|deadline| (deadline, key.clone()))
            })
            .collect();
        ready.sort_by_key(|(deadline, _)| *deadline);

        ready
            .into_iter()
            .filter_map(|(_, key)| self.take(key))
            .collect()
    }

    /// Take every pending value now, earliest deadline first.
    pub fn flush_all(&mut self) -> Vec<(K, T)> {
        let mut keys: Vec<(Instant, K)> = self
            .channels
            .iter()
            .filter_map(|(key, channel)| channel.deadline().map(|d| (d, key.clone())))
            .collect();
        keys.sort_by_key(|(deadline, _)| *deadline);

        keys.into_iter()
            .filter_map(|(_, key)| self.take(key))
            .collect()
    }

    /// Drop every pending value without delivering it.
    pub fn clear(&mut self) {
        self.channels.clear();
    }

    #[must_use]
    /// Earliest deadline across all channels, for scheduling the next poll.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.channels.values().filter_map(Debouncer::deadline).min()
    }

    #[must_use]
    /// Number of channels holding a value.
    pub fn pending_count(&self) -> usize {
        self.channels.values().filter(|c| c.is_pending()).count()
    }

    fn take(&mut self, key: K) -> Option<(K, T)> {
        let mut channel = self.channels.shift_remove(&key)?;
        channel.flush().map(|value| (key, value))
    }
}

#[cfg(test)]
#[path = "tests/debounce.rs"]
mod tests;
