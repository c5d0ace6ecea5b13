//! Observers for state machine activity.
//!
//! A [`Tracer`] is notified about every state entry and exit, every fired
//! transition and every event the machine sees. Tracers are diagnostic only:
//! nothing they do can change which transition fires.

use crate::core::{Event, StateId};
use crate::runtime::TransitionContext;

/// Receives notifications from a running state machine.
///
/// All methods have empty default implementations, so an observer only
/// overrides what it cares about. `machine` is the machine description
/// (empty for anonymous machines).
pub trait Tracer<S: StateId, E: Event>: Send {
    fn state_entered(&self, _machine: &str, _state: &S, _tick: u64) {}

    fn state_exited(&self, _machine: &str, _state: &S, _tick: u64) {}

    fn transition_fired(&self, _machine: &str, _transition: &TransitionContext<'_, S, E>) {}

    fn input_enqueued(&self, _machine: &str, _event: &E) {}

    fn input_unhandled(&self, _machine: &str, _state: &S, _event: &E, _tick: u64) {}
}

/// Tracer that forwards every notification to `tracing`.
///
/// Entries, exits and transitions are logged at `DEBUG`, event traffic at
/// `TRACE`. This is the tracer machines get unless another one is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl<S: StateId, E: Event> Tracer<S, E> for LogTracer {
    fn state_entered(&self, machine: &str, state: &S, tick: u64) {
        tracing::debug!(machine, state = %state.name(), tick, "entering state");
    }

    fn state_exited(&self, machine: &str, state: &S, tick: u64) {
        tracing::debug!(machine, state = %state.name(), tick, "exiting state");
    }

    fn transition_fired(&self, machine: &str, transition: &TransitionContext<'_, S, E>) {
        tracing::debug!(
            machine,
            from = %transition.from.name(),
            to = %transition.to.name(),
            event = ?transition.event.map(|e| e.describe()),
            tick = transition.tick,
            "transition fired"
        );
    }

    fn input_enqueued(&self, machine: &str, event: &E) {
        tracing::trace!(machine, event = %event.describe(), "input enqueued");
    }

    fn input_unhandled(&self, machine: &str, state: &S, event: &E, tick: u64) {
        tracing::trace!(
            machine,
            state = %state.name(),
            event = %event.describe(),
            tick,
            "input not handled"
        );
    }
}

/// Tracer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl<S: StateId, E: Event> Tracer<S, E> for NoopTracer {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Door {
        Open,
        Closed,
    }

    #[derive(Default)]
    struct Collecting {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Tracer<Door, char> for Collecting {
        fn transition_fired(&self, machine: &str, transition: &TransitionContext<'_, Door, char>) {
            self.lines.lock().unwrap().push(format!(
                "{machine}: {:?} -> {:?} on {:?}",
                transition.from, transition.to, transition.event
            ));
        }
    }

    #[test]
    fn default_methods_are_no_ops() {
        let tracer = NoopTracer;
        Tracer::<Door, char>::state_entered(&tracer, "door", &Door::Open, 0);
        Tracer::<Door, char>::input_unhandled(&tracer, "door", &Door::Open, &'x', 1);
    }

    #[test]
    fn log_tracer_accepts_all_notifications() {
        let tracer = LogTracer;
        let context = TransitionContext {
            from: &Door::Open,
            to: &Door::Closed,
            event: Some(&'c'),
            tick: 4,
        };

        Tracer::<Door, char>::state_exited(&tracer, "door", &Door::Open, 4);
        Tracer::<Door, char>::transition_fired(&tracer, "door", &context);
        Tracer::<Door, char>::state_entered(&tracer, "door", &Door::Closed, 4);
        Tracer::<Door, char>::input_enqueued(&tracer, "door", &'c');
    }

    #[test]
    fn custom_tracer_overrides_selected_methods() {
        let tracer = Collecting::default();
        let lines = Arc::clone(&tracer.lines);
        let context = TransitionContext {
            from: &Door::Closed,
            to: &Door::Open,
            event: Some(&'o'),
            tick: 1,
        };

        tracer.state_entered("door", &Door::Open, 1);
        tracer.transition_fired("door", &context);

        assert_eq!(
            *lines.lock().unwrap(),
            vec!["door: Closed -> Open on Some('o')".to_string()]
        );
    }
}
