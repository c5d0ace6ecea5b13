//! Builder for constructing state machines.

use crate::builder::error::{BuildError, ConfigIssue};
use crate::builder::state::StateBuilder;
use crate::builder::transition::TransitionsBuilder;
use crate::builder::validation::validate;
use crate::config::MachineConfig;
use crate::core::{Event, StateId};
use crate::runtime::{State, StateMachine, Transition};
use crate::trace::{LogTracer, Tracer};

/// Builder for constructing state machines with a fluent, staged API.
///
/// Machine-wide settings come first, then `states()` opens the state
/// declarations and `transitions()` the edges. Nothing is checked until
/// `build()`, which reports every problem at once.
///
/// # Example
///
/// ```rust
/// use tickfsm::builder::StateMachineBuilder;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Switch {
///     Off,
///     On,
/// }
///
/// let mut machine = StateMachineBuilder::<Switch, char, ()>::new()
///     .initial_state(Switch::Off)
///     .states()
///     .state(Switch::Off)
///     .state(Switch::On)
///     .transitions()
///     .change(Switch::Off, Switch::On)
///     .on('t')
///     .change(Switch::On, Switch::Off)
///     .on('t')
///     .build()
///     .unwrap();
///
/// machine.init(&mut ()).unwrap();
/// machine.process('t', &mut ()).unwrap();
/// assert!(machine.is_in(&Switch::On));
/// ```
pub struct StateMachineBuilder<S: StateId, E: Event = (), C: 'static = ()> {
    config: MachineConfig,
    tracer: Box<dyn Tracer<S, E>>,
    initial: Vec<S>,
    states: Vec<State<S, C>>,
    transitions: Vec<Transition<S, E, C>>,
}

impl<S: StateId, E: Event, C: 'static> StateMachineBuilder<S, E, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            tracer: Box::new(LogTracer),
            initial: Vec::new(),
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Name the machine in traces and errors.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.config.description = Some(description.into());
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Install a tracer (defaults to [`LogTracer`]).
    pub fn tracer<T>(mut self, tracer: T) -> Self
    where
        T: Tracer<S, E> + 'static,
    {
        self.tracer = Box::new(tracer);
        self
    }

    /// Set the initial state (required, exactly once).
    pub fn initial_state(mut self, state: S) -> Self {
        self.initial.push(state);
        self
    }

    /// Start declaring states.
    pub fn states(self) -> StatesBuilder<S, E, C> {
        StatesBuilder { machine: self }
    }

    /// Add a pre-built state.
    pub fn add_state(mut self, state: State<S, C>) -> Self {
        self.states.push(state);
        self
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, E, C>) -> Self {
        self.transitions.push(transition);
        self
    }

    pub(crate) fn push_state(&mut self, state: State<S, C>) {
        self.states.push(state);
    }

    pub(crate) fn push_transition(&mut self, transition: Transition<S, E, C>) {
        self.transitions.push(transition);
    }

    /// Validate the declaration and build the machine.
    pub fn build(self) -> Result<StateMachine<S, E, C>, BuildError> {
        let checked = validate(&self.initial, &self.states, &self.transitions);
        let machine = self.config.description.clone().unwrap_or_default();

        match (checked, self.initial.into_iter().next()) {
            (Ok(()), Some(initial)) => Ok(StateMachine::from_parts(
                self.config,
                self.tracer,
                initial,
                self.states,
                self.transitions,
            )),
            (Err(issues), _) => Err(BuildError { machine, issues }),
            (Ok(()), None) => Err(BuildError {
                machine,
                issues: vec![ConfigIssue::MissingInitialState],
            }),
        }
    }
}

impl<S: StateId, E: Event, C: 'static> Default for StateMachineBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// The state-declaration stage of a [`StateMachineBuilder`].
pub struct StatesBuilder<S: StateId, E: Event, C: 'static> {
    machine: StateMachineBuilder<S, E, C>,
}

impl<S: StateId, E: Event, C: 'static> StatesBuilder<S, E, C> {
    /// Declare a state and start configuring it.
    pub fn state(self, id: S) -> StateBuilder<S, E, C> {
        StateBuilder::new(self.machine, id)
    }

    /// Declare several states that need no hooks or timers.
    pub fn plain_states(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        for id in ids {
            self.machine.push_state(State::new(id));
        }
        self
    }

    /// Move on to the transitions.
    pub fn transitions(self) -> TransitionsBuilder<S, E, C> {
        TransitionsBuilder::new(self.machine)
    }
}
