//! Machine configuration.
//!
//! Everything here is optional: a machine built without configuration is
//! anonymous, ignores unhandled events and keeps no history. Games that
//! tune these settings from a file can deserialize [`MachineConfig`] and
//! [`TickRate`] directly.

use serde::{Deserialize, Serialize};

/// What `update` does with a dequeued event that no transition consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnhandledEventPolicy {
    /// Drop the event silently
    #[default]
    Ignore,

    /// Drop the event and emit a warning
    Log,

    /// Drop the event and return `MachineError::UnhandledEvent`
    Error,
}

/// Settings of a single state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Name shown in traces and error messages
    pub description: Option<String>,

    /// Handling of events that trigger nothing
    pub unhandled_events: UnhandledEventPolicy,

    /// Number of fired transitions kept in the history (0 disables it)
    pub history_capacity: usize,
}

impl MachineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_unhandled_events(mut self, policy: UnhandledEventPolicy) -> Self {
        self.unhandled_events = policy;
        self
    }

    pub fn with_history(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

/// Frame rate used to express state durations in seconds.
///
/// The machine itself only knows ticks. Games that think in seconds convert
/// with their own frame rate.
///
/// ```rust
/// use tickfsm::config::TickRate;
///
/// let rate = TickRate::new(60);
/// assert_eq!(rate.ticks(2.0), 120);
/// assert_eq!(rate.ticks(0.25), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRate {
    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: u32,
}

fn default_frames_per_second() -> u32 {
    60
}

impl Default for TickRate {
    fn default() -> Self {
        Self {
            frames_per_second: default_frames_per_second(),
        }
    }
}

impl TickRate {
    pub fn new(frames_per_second: u32) -> Self {
        Self { frames_per_second }
    }

    /// Convert seconds into ticks, rounding to the nearest tick.
    ///
    /// Negative and non-finite inputs yield zero.
    pub fn ticks(&self, seconds: f32) -> u32 {
        let ticks = (seconds * self.frames_per_second as f32).round();
        if ticks.is_finite() && ticks > 0.0 {
            ticks as u32
        } else {
            0
        }
    }

    /// Convert ticks back into seconds.
    pub fn seconds(&self, ticks: u32) -> f32 {
        if self.frames_per_second == 0 {
            return 0.0;
        }
        ticks as f32 / self.frames_per_second as f32
    }
}
