//! Time-ordered event queue with FIFO tie-breaking.
//!
//! Events live in a `BTreeMap` keyed by `(time, sequence)`.  The sequence
//! number is assigned on insertion, so two events scheduled for the same
//! instant pop in the order they were pushed.

use std::collections::BTreeMap;

use cq_core::{CustomerId, EventId, SimTime, StationId};

/// What happens when an event fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A new customer walks in.
    Arrival,
    /// The store was full; try generating the next arrival again.
    RetryArrival,
    /// `customer` finishes at `station`.
    ServiceEnd {
        customer: CustomerId,
        station:  StationId,
    },
}

/// A scheduled state transition.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationEvent {
    pub id:   EventId,
    pub time: SimTime,
    pub kind: EventKind,
}

/// Ordering key: time first, then insertion order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct EventKey {
    time:     SimTime,
    sequence: u64,
}

/// Pending events, earliest first.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events:        BTreeMap<EventKey, SimulationEvent>,
    next_sequence: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` at `time` and return the new event's id.
    pub fn push(&mut self, time: SimTime, kind: EventKind) -> EventId {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let id = EventId(sequence);
        self.events.insert(EventKey { time, sequence }, SimulationEvent { id, time, kind });
        id
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<SimulationEvent> {
        self.events.pop_first().map(|(_, event)| event)
    }

    /// Time of the earliest pending event.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.events.first_key_value().map(|(key, _)| key.time)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop every pending event and restart id numbering.
    pub fn clear(&mut self) {
        self.events.clear();
        self.next_sequence = 0;
    }
}
