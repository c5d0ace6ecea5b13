//! Builder API for declaring state machines.
//!
//! A machine is declared in stages: machine-wide settings, then states with
//! their hooks and timeouts, then transitions with their triggers, guards
//! and actions. `build()` validates the whole declaration at once.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;
pub mod transition;
mod validation;

pub use error::{BuildError, ConfigIssue};
pub use machine::{StateMachineBuilder, StatesBuilder};
pub use state::StateBuilder;
pub use transition::{TransitionBuilder, TransitionsBuilder};
