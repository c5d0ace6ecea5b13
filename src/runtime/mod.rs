//! The tick-driven machine and the parts it runs.

pub mod error;
pub mod machine;
pub mod queue;
pub mod state;
pub mod transition;

pub use error::MachineError;
pub use machine::{StateMachine, StepResult};
pub use queue::{InputQueue, InputSender};
pub use state::{State, StateHook};
pub use transition::{EventMatcher, Transition, TransitionAction, TransitionContext, Trigger};
