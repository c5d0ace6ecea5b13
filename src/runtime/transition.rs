//! Transitions between states.

use crate::core::{Event, Guard, StateId};
use std::fmt;

/// Predicate deciding whether a dequeued event triggers a transition.
pub type EventMatcher<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// Callback run when a transition fires, between the exit of the source
/// and the entry of the target.
pub type TransitionAction<S, E, C> = Box<dyn FnMut(&mut C, &TransitionContext<'_, S, E>) + Send>;

/// What makes a transition a candidate on a given tick.
pub enum Trigger<E> {
    /// Candidate on every tick
    Always,

    /// Candidate when the dequeued event equals this value
    Event(E),

    /// Candidate when the dequeued event satisfies the predicate
    Matching(EventMatcher<E>),

    /// Candidate once the source state's timer has run out
    Timeout,
}

impl<E: Event> Trigger<E> {
    /// Whether firing this trigger consumes the dequeued event.
    pub fn consumes_event(&self) -> bool {
        matches!(self, Trigger::Event(_) | Trigger::Matching(_))
    }

    fn accepts(&self, event: Option<&E>, source_terminated: bool) -> bool {
        match self {
            Trigger::Always => true,
            Trigger::Event(expected) => event == Some(expected),
            Trigger::Matching(matcher) => event.is_some_and(|e| matcher(e)),
            Trigger::Timeout => source_terminated,
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Trigger<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Always => f.write_str("Always"),
            Trigger::Event(event) => f.debug_tuple("Event").field(event).finish(),
            Trigger::Matching(_) => f.write_str("Matching(..)"),
            Trigger::Timeout => f.write_str("Timeout"),
        }
    }
}

/// Information handed to transition actions and tracers when a transition fires.
#[derive(Debug)]
pub struct TransitionContext<'a, S, E> {
    pub from: &'a S,
    pub to: &'a S,
    /// The triggering event, for event-triggered transitions only
    pub event: Option<&'a E>,
    /// Machine tick on which the transition fires
    pub tick: u64,
}

/// An edge of the state graph.
pub struct Transition<S, E, C> {
    pub source: S,
    pub target: S,
    pub trigger: Trigger<E>,
    pub guard: Option<Guard<C>>,
    pub action: Option<TransitionAction<S, E, C>>,
}

impl<S: StateId, E: Event, C> Transition<S, E, C> {
    /// Create an unguarded transition without action.
    pub fn new(source: S, target: S, trigger: Trigger<E>) -> Self {
        Self {
            source,
            target,
            trigger,
            guard: None,
            action: None,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Check whether this transition may fire given the dequeued event (if
    /// any) and the termination status of its source state. The guard is
    /// only evaluated once the trigger matches.
    pub fn is_eligible(&self, event: Option<&E>, source_terminated: bool, context: &C) -> bool {
        self.trigger.accepts(event, source_terminated)
            && self.guard.as_ref().map_or(true, |g| g.check(context))
    }

    pub(crate) fn run_action(&mut self, context: &mut C, firing: &TransitionContext<'_, S, E>) {
        if let Some(action) = self.action.as_mut() {
            action(context, firing);
        }
    }
}

impl<S: fmt::Debug, E: fmt::Debug, C> fmt::Debug for Transition<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("trigger", &self.trigger)
            .field("guarded", &self.guard.is_some())
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Switch {
        Off,
        On,
    }

    #[derive(Clone, PartialEq, Debug)]
    enum Input {
        Toggle,
        Key(char),
    }

    struct Panel {
        powered: bool,
        toggles: u32,
    }

    fn panel() -> Panel {
        Panel {
            powered: true,
            toggles: 0,
        }
    }

    #[test]
    fn always_trigger_ignores_events() {
        let transition: Transition<Switch, Input, Panel> =
            Transition::new(Switch::Off, Switch::On, Trigger::Always);

        assert!(transition.is_eligible(None, false, &panel()));
        assert!(transition.is_eligible(Some(&Input::Key('q')), false, &panel()));
    }

    #[test]
    fn event_trigger_requires_equal_event() {
        let transition: Transition<Switch, Input, Panel> =
            Transition::new(Switch::Off, Switch::On, Trigger::Event(Input::Toggle));

        assert!(transition.is_eligible(Some(&Input::Toggle), false, &panel()));
        assert!(!transition.is_eligible(Some(&Input::Key('t')), false, &panel()));
        assert!(!transition.is_eligible(None, false, &panel()));
    }

    #[test]
    fn matching_trigger_uses_predicate() {
        let transition: Transition<Switch, Input, Panel> = Transition::new(
            Switch::Off,
            Switch::On,
            Trigger::Matching(Box::new(|e: &Input| matches!(e, Input::Key(_)))),
        );

        assert!(transition.is_eligible(Some(&Input::Key('a')), false, &panel()));
        assert!(!transition.is_eligible(Some(&Input::Toggle), false, &panel()));
        assert!(!transition.is_eligible(None, false, &panel()));
    }

    #[test]
    fn timeout_trigger_requires_terminated_source() {
        let transition: Transition<Switch, Input, Panel> =
            Transition::new(Switch::On, Switch::Off, Trigger::Timeout);

        assert!(!transition.is_eligible(None, false, &panel()));
        assert!(transition.is_eligible(None, true, &panel()));
    }

    #[test]
    fn guard_gates_every_trigger() {
        let mut transition: Transition<Switch, Input, Panel> =
            Transition::new(Switch::Off, Switch::On, Trigger::Event(Input::Toggle));
        transition.guard = Some(Guard::new(|p: &Panel| p.powered));

        let unpowered = Panel {
            powered: false,
            toggles: 0,
        };
        assert!(transition.is_eligible(Some(&Input::Toggle), false, &panel()));
        assert!(!transition.is_eligible(Some(&Input::Toggle), false, &unpowered));
    }

    #[test]
    fn action_receives_firing_context() {
        let mut transition: Transition<Switch, Input, Panel> =
            Transition::new(Switch::Off, Switch::On, Trigger::Event(Input::Toggle));
        transition.action = Some(Box::new(
            |p: &mut Panel, firing: &TransitionContext<'_, Switch, Input>| {
                assert_eq!(firing.event, Some(&Input::Toggle));
                p.toggles += 1;
            },
        ));

        let mut panel = panel();
        let firing = TransitionContext {
            from: &Switch::Off,
            to: &Switch::On,
            event: Some(&Input::Toggle),
            tick: 1,
        };
        transition.run_action(&mut panel, &firing);

        assert_eq!(panel.toggles, 1);
    }

    #[test]
    fn only_event_triggers_consume_events() {
        assert!(Trigger::Event(Input::Toggle).consumes_event());
        assert!(Trigger::<Input>::Matching(Box::new(|_: &Input| true)).consumes_event());
        assert!(!Trigger::<Input>::Always.consumes_event());
        assert!(!Trigger::<Input>::Timeout.consumes_event());
    }

    #[test]
    fn self_loop_detection() {
        let transition: Transition<Switch, Input, Panel> =
            Transition::new(Switch::On, Switch::On, Trigger::Timeout);
        assert!(transition.is_self_loop());
    }
}
