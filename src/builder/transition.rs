//! Builders for declaring transitions.

use crate::builder::error::BuildError;
use crate::builder::machine::StateMachineBuilder;
use crate::core::{Event, Guard, StateId};
use crate::runtime::{StateMachine, Transition, TransitionContext, Trigger};

/// The transition-declaration stage of a [`StateMachineBuilder`].
///
/// Transitions leaving the same state are tried in the order they are
/// declared here.
pub struct TransitionsBuilder<S: StateId, E: Event, C: 'static> {
    machine: StateMachineBuilder<S, E, C>,
}

impl<S: StateId, E: Event, C: 'static> TransitionsBuilder<S, E, C> {
    pub(crate) fn new(machine: StateMachineBuilder<S, E, C>) -> Self {
        Self { machine }
    }

    /// Declare a transition from `source` to `target`.
    pub fn change(self, source: S, target: S) -> TransitionBuilder<S, E, C> {
        TransitionBuilder::new(self.machine, source, target)
    }

    /// Declare a self-loop on `state`. Firing it leaves and re-enters the
    /// state, restarting its timer.
    pub fn keep(self, state: S) -> TransitionBuilder<S, E, C> {
        let target = state.clone();
        TransitionBuilder::new(self.machine, state, target)
    }

    /// Validate the declaration and build the machine.
    pub fn build(self) -> Result<StateMachine<S, E, C>, BuildError> {
        self.machine.build()
    }
}

/// Qualifies the transition most recently declared with `change` or `keep`.
///
/// Without qualifiers a transition fires on every tick. At most one trigger
/// applies: `on`, `on_match` and `on_timeout` replace each other.
pub struct TransitionBuilder<S: StateId, E: Event, C: 'static> {
    machine: StateMachineBuilder<S, E, C>,
    transition: Transition<S, E, C>,
}

impl<S: StateId, E: Event, C: 'static> TransitionBuilder<S, E, C> {
    fn new(machine: StateMachineBuilder<S, E, C>, source: S, target: S) -> Self {
        Self {
            machine,
            transition: Transition::new(source, target, Trigger::Always),
        }
    }

    /// Fire only when the dequeued event equals `event`.
    pub fn on(mut self, event: E) -> Self {
        self.transition.trigger = Trigger::Event(event);
        self
    }

    /// Fire only when the dequeued event satisfies `matcher`.
    pub fn on_match<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.transition.trigger = Trigger::Matching(Box::new(matcher));
        self
    }

    /// Fire only once the source state's timer has run out.
    pub fn on_timeout(mut self) -> Self {
        self.transition.trigger = Trigger::Timeout;
        self
    }

    /// Add a guard that must also hold.
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.transition.guard = Some(guard);
        self
    }

    /// Add a guard using a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.transition.guard = Some(Guard::new(predicate));
        self
    }

    /// Run `action` when the transition fires, after the source state is
    /// left and before the target state is entered.
    pub fn act<F>(mut self, action: F) -> Self
    where
        F: FnMut(&mut C, &TransitionContext<'_, S, E>) + Send + 'static,
    {
        self.transition.action = Some(Box::new(action));
        self
    }

    /// Declare the next transition.
    pub fn change(self, source: S, target: S) -> TransitionBuilder<S, E, C> {
        TransitionBuilder::new(self.commit(), source, target)
    }

    /// Declare a self-loop as the next transition.
    pub fn keep(self, state: S) -> TransitionBuilder<S, E, C> {
        let target = state.clone();
        TransitionBuilder::new(self.commit(), state, target)
    }

    /// Validate the declaration and build the machine.
    pub fn build(self) -> Result<StateMachine<S, E, C>, BuildError> {
        self.commit().build()
    }

    fn commit(self) -> StateMachineBuilder<S, E, C> {
        let mut machine = self.machine;
        machine.push_transition(self.transition);
        machine
    }
}
