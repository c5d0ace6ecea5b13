//! Tick-based state timers.
//!
//! A state may declare how many ticks it lasts. The timer is reset whenever
//! the state is entered and counts down once per tick while the state is
//! current. When it reaches zero the state is terminated and its timeout
//! transitions become eligible.

use std::fmt;

/// Duration value meaning "never times out".
pub const FOREVER: Option<u32> = None;

/// How long a state lasts once entered.
pub enum Timeout<C> {
    /// The state never terminates on its own.
    Forever,
    /// Fixed number of ticks.
    Ticks(u32),
    /// Number of ticks computed from the context each time the state is entered.
    Computed(Box<dyn Fn(&C) -> u32 + Send + Sync>),
}

impl<C> Timeout<C> {
    /// Resolve the duration for an entry happening now.
    ///
    /// Returns `None` for [`Timeout::Forever`].
    pub fn resolve(&self, context: &C) -> Option<u32> {
        match self {
            Timeout::Forever => FOREVER,
            Timeout::Ticks(ticks) => Some(*ticks),
            Timeout::Computed(compute) => Some(compute(context)),
        }
    }
}

impl<C> Default for Timeout<C> {
    fn default() -> Self {
        Timeout::Forever
    }
}

impl<C> fmt::Debug for Timeout<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeout::Forever => f.write_str("Forever"),
            Timeout::Ticks(ticks) => write!(f, "Ticks({ticks})"),
            Timeout::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Countdown of a single state.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::Timer;
///
/// let mut timer = Timer::default();
/// timer.reset(Some(2));
/// assert!(!timer.is_expired());
///
/// timer.advance();
/// timer.advance();
/// assert!(timer.is_expired());
/// assert_eq!(timer.consumed(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    duration: Option<u32>,
    remaining: Option<u32>,
    consumed: u64,
}

impl Timer {
    /// Start a new countdown of `duration` ticks (`None` never expires).
    pub fn reset(&mut self, duration: Option<u32>) {
        self.duration = duration;
        self.remaining = duration;
        self.consumed = 0;
    }

    /// Restart the countdown with the duration currently in force.
    pub fn restart(&mut self) {
        self.remaining = self.duration;
    }

    /// Count one tick.
    pub fn advance(&mut self) {
        self.consumed += 1;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
    }

    /// Duration in force since the last reset.
    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    /// Ticks left before expiry, `None` for timers that never expire.
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Ticks counted since the last reset.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == Some(0)
    }
}
