//! Errors raised while driving a state machine.

use thiserror::Error;

/// Errors that can occur when initializing, updating or querying a machine.
///
/// All of them indicate a programming error in the host game except
/// `UnhandledEvent`, which is only produced when the machine is configured
/// with `UnhandledEventPolicy::Error`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("State machine '{machine}' is not initialized. Call .init() before using it")]
    NotInitialized { machine: String },

    #[error("State machine '{machine}' has no state {state}")]
    UnknownState { machine: String, state: String },

    #[error("State machine '{machine}' in state {state} has no transition for input {event}")]
    UnhandledEvent {
        machine: String,
        state: String,
        event: String,
    },
}
