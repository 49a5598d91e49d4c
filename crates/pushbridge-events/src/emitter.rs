// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pending-event store.
//
// Events produced by native callbacks wait here, partitioned by type, until
// the host runtime drains them. Every mutation of the store happens under
// one write lock. Read-only queries share the read side.
//
// A broadcast channel announces "an event of type T is now pending". The
// announcement is sent after the write lock is released so a subscriber that
// reacts immediately always finds the event in the store.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::broadcast;
use tracing::{debug, instrument, trace};

use crate::event::{Event, EventType};

/// Buffered announcements per subscriber before the slowest one lags.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// An event plus its arrival number across all types.
#[derive(Debug)]
struct Stored {
    seq: u64,
    event: Event,
}

#[derive(Debug, Default)]
struct Pending {
    next_seq: u64,
    queues: HashMap<EventType, Vec<Stored>>,
}

/// Type-partitioned queue of undelivered events.
///
/// One instance is created by the composition root and shared through
/// `Arc` with every producer and the drain side.
pub struct EventEmitter {
    pending: RwLock<Pending>,
    added: broadcast::Sender<EventType>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::with_channel_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_channel_capacity(capacity: usize) -> Self {
        let (added, _) = broadcast::channel(capacity.max(1));
        Self {
            pending: RwLock::new(Pending::default()),
            added,
        }
    }

    /// Subscribe to "event became pending" announcements.
    ///
    /// A subscriber that falls more than the channel capacity behind sees
    /// `RecvError::Lagged`; the events themselves stay in the store.
    pub fn subscribe(&self) -> broadcast::Receiver<EventType> {
        self.added.subscribe()
    }

    /// Store `event` using its type's replace policy.
    pub fn add(&self, event: Event) {
        let replace_pending = event.event_type().replaces_pending();
        self.add_event(event, replace_pending);
    }

    /// Store `event`. With `replace_pending` every undelivered event of the
    /// same type is discarded first, in the same critical section.
    #[instrument(skip_all, fields(event_type = %event.event_type(), replace_pending = replace_pending))]
    pub fn add_event(&self, event: Event, replace_pending: bool) {
        let event_type = event.event_type();
        {
            let mut pending = self.write();
            let seq = pending.next_seq;
            pending.next_seq += 1;

            let queue = pending.queues.entry(event_type).or_default();
            if replace_pending && !queue.is_empty() {
                debug!(discarded = queue.len(), "replacing pending events");
                queue.clear();
            }
            queue.push(Stored { seq, event });
        }

        // No receivers is not an error.
        let _ = self.added.send(event_type);
        trace!("event pending");
    }

    /// Whether any of `types` has an undelivered event.
    pub fn has_events(&self, types: &[EventType]) -> bool {
        let pending = self.read();
        types
            .iter()
            .any(|t| pending.queues.get(t).is_some_and(|queue| !queue.is_empty()))
    }

    pub fn has_any_events(&self) -> bool {
        self.read().queues.values().any(|queue| !queue.is_empty())
    }

    /// Number of undelivered events of one type.
    pub fn pending_count(&self, event_type: EventType) -> usize {
        self.read().queues.get(&event_type).map_or(0, Vec::len)
    }

    /// Remove and return every event of `types`.
    ///
    /// Result order is request order across types and insertion order within
    /// a type. Drained types are left present with an empty queue.
    #[instrument(skip_all, fields(types = types.len()))]
    pub fn take_pending(&self, types: &[EventType]) -> Vec<Event> {
        let mut pending = self.write();
        let mut taken = Vec::new();
        for event_type in types {
            let queue = pending.queues.entry(*event_type).or_default();
            taken.extend(queue.drain(..).map(|stored| stored.event));
        }
        debug!(taken = taken.len(), "drained pending events");
        taken
    }

    /// Visit the pending events of `types` and remove those for which
    /// `predicate` returns `true`; the rest stay in place and in order.
    ///
    /// Events are visited in the order they were added, interleaving the
    /// requested types, so within one type this is insertion order. Each
    /// event is visited once even if its type is requested twice. The write
    /// lock is held for the whole walk, so `predicate` must not call back
    /// into this emitter.
    #[instrument(skip_all, fields(types = types.len()))]
    pub fn process_pending<F>(&self, types: &[EventType], mut predicate: F)
    where
        F: FnMut(&Event) -> bool,
    {
        let mut pending = self.write();

        let mut requested = Vec::with_capacity(types.len());
        for event_type in types {
            if !requested.contains(event_type) {
                requested.push(*event_type);
            }
        }

        let mut visit: Vec<&Stored> = requested
            .iter()
            .filter_map(|t| pending.queues.get(t))
            .flatten()
            .collect();
        visit.sort_by_key(|stored| stored.seq);

        let removed: HashSet<u64> = visit
            .into_iter()
            .filter(|stored| predicate(&stored.event))
            .map(|stored| stored.seq)
            .collect();

        for event_type in requested {
            pending
                .queues
                .entry(event_type)
                .or_default()
                .retain(|stored| !removed.contains(&stored.seq));
        }
        debug!(removed = removed.len(), "processed pending events");
    }

    // A panicking producer must not wedge the store for everyone else. The
    // map is never left half-mutated by any method here, so the data behind a
    // poisoned lock is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Pending> {
        self.pending.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Pending> {
        self.pending.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = self.read();
        let counts: Vec<(EventType, usize)> = pending
            .queues
            .iter()
            .map(|(t, queue)| (*t, queue.len()))
            .collect();
        f.debug_struct("EventEmitter")
            .field("pending", &counts)
            .field("subscribers", &self.added.receiver_count())
            .finish()
    }
}
