//! Transition history tracking.
//!
//! A bounded log of the transitions a machine has fired, kept for
//! diagnostics (debug overlays, replay inspection, test assertions). The
//! history never influences transition selection.

use super::state::{Event, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single fired transition.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::TransitionRecord;
/// use chrono::Utc;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// let record: TransitionRecord<Light, ()> = TransitionRecord {
///     from: Light::Red,
///     to: Light::Green,
///     event: None,
///     tick: 3,
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_self_loop());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize, E: Serialize",
    deserialize = "S: Deserialize<'de>, E: Deserialize<'de>"
))]
pub struct TransitionRecord<S, E> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// The event that triggered the transition, if it was event-triggered
    pub event: Option<E>,
    /// Machine tick on which the transition fired
    pub tick: u64,
    /// Wall-clock time of the firing (diagnostic only)
    pub timestamp: DateTime<Utc>,
}

impl<S: StateId, E: Event> TransitionRecord<S, E> {
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Bounded, ordered history of fired transitions.
///
/// When the history is full the oldest record is dropped. A capacity of
/// zero disables recording altogether.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::{TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history: TransitionHistory<&str, ()> = TransitionHistory::with_capacity(8);
///
/// for (tick, (from, to)) in [("intro", "ready"), ("ready", "playing")].into_iter().enumerate() {
///     history.push(TransitionRecord {
///         from,
///         to,
///         event: None,
///         tick: tick as u64,
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.get_path(), vec![&"intro", &"ready", &"playing"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize, E: Serialize",
    deserialize = "S: Deserialize<'de>, E: Deserialize<'de>"
))]
pub struct TransitionHistory<S, E> {
    capacity: usize,
    records: VecDeque<TransitionRecord<S, E>>,
}

impl<S, E> Default for TransitionHistory<S, E> {
    fn default() -> Self {
        Self::disabled()
    }
}

impl<S, E> TransitionHistory<S, E> {
    /// Create a history keeping at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    /// Create a history that records nothing.
    pub fn disabled() -> Self {
        Self::with_capacity(0)
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record, evicting the oldest one when full.
    pub fn push(&mut self, record: TransitionRecord<S, E>) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Drop all records, keeping the capacity.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Records in firing order, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord<S, E>> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord<S, E>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Path of states traversed: the source of the oldest record, then the
    /// target of every record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        path.extend(self.records.iter().map(|record| &record.to));
        path
    }

    /// Wall-clock time between the oldest and the newest record.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
