//! Core building blocks of the state machine.
//!
//! This module contains the pieces that do not depend on a running machine:
//! - Identifier traits for states and events
//! - Guard predicates over the caller context
//! - Tick-based timers
//! - Bounded transition history

mod guard;
mod history;
mod state;
mod timer;

pub use guard::Guard;
pub use history::{TransitionHistory, TransitionRecord};
pub use state::{Event, StateId};
pub use timer::{Timeout, Timer, FOREVER};
