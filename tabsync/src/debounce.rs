//! Keyed, cancelable, trailing-edge debouncing.
//!
//! The host event loop owns the clock: it passes `now` into every call and
//! uses [`Debouncer::next_deadline`] to decide how long it may sleep, the
//! same way an animation manager reports its next completion time.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<P> {
    payload: P,
    deadline: Instant,
}

/// Debounces tasks per key.
///
/// Scheduling a key that is already pending replaces its payload and pushes
/// its deadline out, so only the last write in a quiet window fires. Nothing
/// fires on the leading edge.
#[derive(Debug, Clone)]
pub struct Debouncer<K, P> {
    delay: Duration,
    pending: HashMap<K, Pending<P>>,
}

impl<K, P> Debouncer<K, P>
where
    K: Eq + Hash + Clone,
{
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// Schedule `payload` for `key`, replacing anything already pending.
    pub fn schedule(&mut self, key: K, payload: P, now: Instant) {
        self.pending.insert(
            key,
            Pending {
                payload,
                deadline: now + self.delay,
            },
        );
    }

    /// Drop a pending task without firing it.
    ///
    /// Returns the payload that would have fired.
    pub fn cancel(&mut self, key: &K) -> Option<P> {
        self.pending.remove(key).map(|p| p.payload)
    }

    /// Drop every pending task.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Earliest deadline among pending tasks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Remove and return every task due at `now`, earliest deadline first.
    pub fn poll(&mut self, now: Instant) -> Vec<(K, P)> {
        let due: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(k, _)| k.clone())
            .collect();

        let mut fired: Vec<(Instant, K, P)> = due
            .into_iter()
            .filter_map(|key| {
                let pending = self.pending.remove(&key)?;
                Some((pending.deadline, key, pending.payload))
            })
            .collect();
        fired.sort_by_key(|(deadline, _, _)| *deadline);
        fired.into_iter().map(|(_, key, payload)| (key, payload)).collect()
    }
}
