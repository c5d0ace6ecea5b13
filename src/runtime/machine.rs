//! State machine driven by one `update` per tick.

use crate::builder::StateMachineBuilder;
use crate::config::{MachineConfig, UnhandledEventPolicy};
use crate::core::{Event, StateId, TransitionHistory, TransitionRecord};
use crate::runtime::error::MachineError;
use crate::runtime::queue::{InputQueue, InputSender};
use crate::runtime::state::State;
use crate::runtime::transition::{Transition, TransitionContext};
use crate::trace::Tracer;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;

/// Outcome of a single `update`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult<S> {
    /// No transition fired; the current state is unchanged
    Stayed,

    /// A transition fired (possibly a self-loop)
    Transitioned { from: S, to: S },
}

impl<S> StepResult<S> {
    pub fn is_transition(&self) -> bool {
        matches!(self, StepResult::Transitioned { .. })
    }
}

/// Finite state machine over state ids `S`, events `E` and a caller context `C`.
///
/// Built with [`StateMachine::builder`]. After `init`, every `update` ticks the
/// current state, dequeues at most one pending event and fires at most one
/// transition: the first one, in declaration order, that is eligible.
pub struct StateMachine<S: StateId, E: Event = (), C: 'static = ()> {
    description: String,
    unhandled_events: UnhandledEventPolicy,
    initial: S,
    current: Option<S>,
    order: Vec<S>,
    states: HashMap<S, State<S, C>>,
    transitions: HashMap<S, Vec<Transition<S, E, C>>>,
    inputs: InputQueue<E>,
    tracer: Box<dyn Tracer<S, E>>,
    history: TransitionHistory<S, E>,
    ticks: u64,
}

fn unknown_state<S: StateId>(machine: &str, state: &S) -> MachineError {
    MachineError::UnknownState {
        machine: machine.to_string(),
        state: state.name(),
    }
}

impl<S: StateId, E: Event, C: 'static> StateMachine<S, E, C> {
    /// Start declaring a new machine.
    pub fn builder() -> StateMachineBuilder<S, E, C> {
        StateMachineBuilder::new()
    }

    /// Assemble a machine from already validated parts.
    pub(crate) fn from_parts(
        config: MachineConfig,
        tracer: Box<dyn Tracer<S, E>>,
        initial: S,
        states: Vec<State<S, C>>,
        transitions: Vec<Transition<S, E, C>>,
    ) -> Self {
        let order: Vec<S> = states.iter().map(|state| state.id().clone()).collect();
        let states = states
            .into_iter()
            .map(|state| (state.id().clone(), state))
            .collect();

        let mut by_source: HashMap<S, Vec<Transition<S, E, C>>> = HashMap::new();
        for transition in transitions {
            by_source
                .entry(transition.source.clone())
                .or_default()
                .push(transition);
        }

        Self {
            description: config.description.unwrap_or_default(),
            unhandled_events: config.unhandled_events,
            initial,
            current: None,
            order,
            states,
            transitions: by_source,
            inputs: InputQueue::new(),
            tracer,
            history: TransitionHistory::with_capacity(config.history_capacity),
            ticks: 0,
        }
    }

    /// Enter the initial state.
    ///
    /// Calling `init` again restarts the machine from its initial state
    /// without running the exit hook of the state it was in. Pending inputs
    /// are kept.
    pub fn init(&mut self, context: &mut C) -> Result<(), MachineError> {
        let initial = self.initial.clone();
        self.ticks = 0;
        self.current = Some(initial.clone());
        self.enter_state(&initial, context)
    }

    /// Advance the machine by one tick.
    pub fn update(&mut self, context: &mut C) -> Result<StepResult<S>, MachineError> {
        let current = self.current.clone().ok_or_else(|| MachineError::NotInitialized {
            machine: self.description.clone(),
        })?;
        self.ticks += 1;

        let state = self
            .states
            .get_mut(&current)
            .ok_or_else(|| unknown_state(&self.description, &current))?;
        state.tick(context);
        let terminated = state.is_terminated();

        let event = self.inputs.pop();
        let selected = self.transitions.get(&current).and_then(|candidates| {
            candidates
                .iter()
                .position(|t| t.is_eligible(event.as_ref(), terminated, &*context))
        });

        match selected {
            Some(index) => self.fire(current, index, event, context),
            None => {
                if let Some(event) = event {
                    self.reject(&current, &event)?;
                }
                Ok(StepResult::Stayed)
            }
        }
    }

    /// Enqueue `event` and run one `update`.
    pub fn process(&mut self, event: E, context: &mut C) -> Result<StepResult<S>, MachineError> {
        self.add_input(event);
        self.update(context)
    }

    /// Enqueue an event for a later tick.
    pub fn add_input(&self, event: E) {
        self.tracer.input_enqueued(&self.description, &event);
        self.inputs.push(event);
    }

    /// Producer handle for this machine's input queue.
    pub fn input_sender(&self) -> InputSender<E> {
        self.inputs.sender()
    }

    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn clear_inputs(&self) {
        self.inputs.clear();
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_state(&self) -> Result<&S, MachineError> {
        self.current.as_ref().ok_or_else(|| MachineError::NotInitialized {
            machine: self.description.clone(),
        })
    }

    /// Whether the machine is currently in `id`. False before `init`.
    pub fn is_in(&self, id: &S) -> bool {
        self.current.as_ref() == Some(id)
    }

    /// Look up a declared state.
    pub fn state(&self, id: &S) -> Result<&State<S, C>, MachineError> {
        self.states
            .get(id)
            .ok_or_else(|| unknown_state(&self.description, id))
    }

    /// Restart the timer of the current state without leaving it.
    pub fn restart_timer(&mut self) -> Result<(), MachineError> {
        let current = self.current.as_ref().ok_or_else(|| MachineError::NotInitialized {
            machine: self.description.clone(),
        })?;
        self.states
            .get_mut(current)
            .ok_or_else(|| unknown_state(&self.description, current))?
            .restart_timer();
        Ok(())
    }

    /// Declared state ids, in declaration order.
    pub fn state_ids(&self) -> impl Iterator<Item = &S> {
        self.order.iter()
    }

    /// Outgoing transitions of `id`, in declaration order.
    pub fn transitions_from(&self, id: &S) -> &[Transition<S, E, C>] {
        self.transitions.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of `update` calls since the last `init`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn history(&self) -> &TransitionHistory<S, E> {
        &self.history
    }

    fn fire(
        &mut self,
        from: S,
        index: usize,
        event: Option<E>,
        context: &mut C,
    ) -> Result<StepResult<S>, MachineError> {
        let (to, consumes_event) = match self.transitions.get(&from).and_then(|c| c.get(index)) {
            Some(transition) => (
                transition.target.clone(),
                transition.trigger.consumes_event(),
            ),
            None => return Err(unknown_state(&self.description, &from)),
        };

        // events dequeued this tick are gone even if a non-event transition wins
        let event = match event {
            Some(event) if !consumes_event => {
                self.tracer
                    .input_unhandled(&self.description, &from, &event, self.ticks);
                None
            }
            event => event,
        };

        self.leave_state(&from, context)?;
        self.current = Some(to.clone());

        let firing = TransitionContext {
            from: &from,
            to: &to,
            event: event.as_ref(),
            tick: self.ticks,
        };
        self.tracer.transition_fired(&self.description, &firing);
        if let Some(transition) = self
            .transitions
            .get_mut(&from)
            .and_then(|c| c.get_mut(index))
        {
            transition.run_action(context, &firing);
        }

        self.enter_state(&to, context)?;

        if self.history.is_enabled() {
            self.history.push(TransitionRecord {
                from: from.clone(),
                to: to.clone(),
                event,
                tick: self.ticks,
                timestamp: Utc::now(),
            });
        }

        Ok(StepResult::Transitioned { from, to })
    }

    fn enter_state(&mut self, id: &S, context: &mut C) -> Result<(), MachineError> {
        let state = self
            .states
            .get_mut(id)
            .ok_or_else(|| unknown_state(&self.description, id))?;
        self.tracer.state_entered(&self.description, id, self.ticks);
        state.enter(context);
        Ok(())
    }

    fn leave_state(&mut self, id: &S, context: &mut C) -> Result<(), MachineError> {
        let state = self
            .states
            .get_mut(id)
            .ok_or_else(|| unknown_state(&self.description, id))?;
        self.tracer.state_exited(&self.description, id, self.ticks);
        state.leave(context);
        Ok(())
    }

    fn reject(&self, state: &S, event: &E) -> Result<(), MachineError> {
        self.tracer
            .input_unhandled(&self.description, state, event, self.ticks);
        match self.unhandled_events {
            UnhandledEventPolicy::Ignore => Ok(()),
            UnhandledEventPolicy::Log => {
                tracing::warn!(
                    machine = %self.description,
                    state = %state.name(),
                    event = %event.describe(),
                    tick = self.ticks,
                    "no transition for input"
                );
                Ok(())
            }
            UnhandledEventPolicy::Error => Err(MachineError::UnhandledEvent {
                machine: self.description.clone(),
                state: state.name(),
                event: event.describe(),
            }),
        }
    }
}

impl<S: StateId, E: Event, C: 'static> fmt::Debug for StateMachine<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("description", &self.description)
            .field("current", &self.current)
            .field("ticks", &self.ticks)
            .field("states", &self.order)
            .field("pending_inputs", &self.inputs.len())
            .finish_non_exhaustive()
    }
}
