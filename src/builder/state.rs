//! Builder for configuring a single state.

use crate::builder::machine::StateMachineBuilder;
use crate::builder::transition::TransitionsBuilder;
use crate::core::{Event, StateId, Timeout};
use crate::runtime::State;

/// Configures the state most recently declared with `state(id)`.
///
/// The state is committed to the machine when the next state is declared
/// or when the builder moves on to `transitions()`.
pub struct StateBuilder<S: StateId, E: Event, C: 'static> {
    machine: StateMachineBuilder<S, E, C>,
    state: State<S, C>,
}

impl<S: StateId, E: Event, C: 'static> StateBuilder<S, E, C> {
    pub(crate) fn new(machine: StateMachineBuilder<S, E, C>, id: S) -> Self {
        Self {
            machine,
            state: State::new(id),
        }
    }

    /// Run `hook` each time the state is entered.
    pub fn on_entry<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.state = self.state.with_entry(Box::new(hook));
        self
    }

    /// Run `hook` on every tick spent in the state, before transitions are checked.
    pub fn on_tick<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.state = self.state.with_tick(Box::new(hook));
        self
    }

    /// Run `hook` each time the state is left.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.state = self.state.with_exit(Box::new(hook));
        self
    }

    /// Terminate the state `ticks` ticks after each entry.
    pub fn timeout_after(mut self, ticks: u32) -> Self {
        self.state = self.state.with_timeout(Timeout::Ticks(ticks));
        self
    }

    /// Terminate the state after a number of ticks computed on each entry.
    pub fn timeout_with<F>(mut self, ticks: F) -> Self
    where
        F: Fn(&C) -> u32 + Send + Sync + 'static,
    {
        self.state = self.state.with_timeout(Timeout::Computed(Box::new(ticks)));
        self
    }

    /// Declare the next state.
    pub fn state(self, id: S) -> StateBuilder<S, E, C> {
        StateBuilder::new(self.commit(), id)
    }

    /// Move on to the transitions.
    pub fn transitions(self) -> TransitionsBuilder<S, E, C> {
        TransitionsBuilder::new(self.commit())
    }

    fn commit(self) -> StateMachineBuilder<S, E, C> {
        let mut machine = self.machine;
        machine.push_state(self.state);
        machine
    }
}
