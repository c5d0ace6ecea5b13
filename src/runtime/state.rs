//! Runtime representation of a single state.

use crate::core::{StateId, Timeout, Timer};
use std::fmt;

/// Entry, tick or exit callback of a state.
pub type StateHook<C> = Box<dyn FnMut(&mut C) + Send>;

/// A state of a running machine: its hooks and its timer.
///
/// States are created by the builder and owned by their machine. Their
/// hooks only run while the state is current.
pub struct State<S, C> {
    id: S,
    timeout: Timeout<C>,
    timer: Timer,
    on_entry: Option<StateHook<C>>,
    on_tick: Option<StateHook<C>>,
    on_exit: Option<StateHook<C>>,
}

impl<S: StateId, C> State<S, C> {
    /// Create a state without hooks that never times out.
    pub fn new(id: S) -> Self {
        Self {
            id,
            timeout: Timeout::Forever,
            timer: Timer::default(),
            on_entry: None,
            on_tick: None,
            on_exit: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Timeout<C>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_entry(mut self, hook: StateHook<C>) -> Self {
        self.on_entry = Some(hook);
        self
    }

    pub fn with_tick(mut self, hook: StateHook<C>) -> Self {
        self.on_tick = Some(hook);
        self
    }

    pub fn with_exit(mut self, hook: StateHook<C>) -> Self {
        self.on_exit = Some(hook);
        self
    }

    pub fn id(&self) -> &S {
        &self.id
    }

    /// Reset the timer to a freshly resolved duration, then run the entry hook.
    pub fn enter(&mut self, context: &mut C) {
        let duration = self.timeout.resolve(context);
        self.timer.reset(duration);
        if let Some(hook) = self.on_entry.as_mut() {
            hook(context);
        }
    }

    /// Run the tick hook, then count the tick against the timer.
    pub fn tick(&mut self, context: &mut C) {
        if let Some(hook) = self.on_tick.as_mut() {
            hook(context);
        }
        self.timer.advance();
    }

    /// Run the exit hook.
    pub fn leave(&mut self, context: &mut C) {
        if let Some(hook) = self.on_exit.as_mut() {
            hook(context);
        }
    }

    /// Restart the countdown with the duration resolved at the last entry.
    pub fn restart_timer(&mut self) {
        self.timer.restart();
    }

    /// True once the timer has run down to zero. Never true for states
    /// without a duration.
    pub fn is_terminated(&self) -> bool {
        self.timer.is_expired()
    }

    /// Duration resolved at the last entry, `None` if the state lasts forever.
    pub fn duration(&self) -> Option<u32> {
        self.timer.duration()
    }

    pub fn ticks_remaining(&self) -> Option<u32> {
        self.timer.remaining()
    }

    pub fn ticks_consumed(&self) -> u64 {
        self.timer.consumed()
    }
}

impl<S: fmt::Debug, C> fmt::Debug for State<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("id", &self.id)
            .field("timeout", &self.timeout)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Phase {
        Ready,
    }

    #[derive(Default)]
    struct Calls {
        log: Vec<&'static str>,
        level: u32,
    }

    fn recording_state(duration: u32) -> State<Phase, Calls> {
        State::new(Phase::Ready)
            .with_timeout(Timeout::Ticks(duration))
            .with_entry(Box::new(|c: &mut Calls| c.log.push("entry")))
            .with_tick(Box::new(|c: &mut Calls| c.log.push("tick")))
            .with_exit(Box::new(|c: &mut Calls| c.log.push("exit")))
    }

    #[test]
    fn hooks_run_in_lifecycle_order() {
        let mut calls = Calls::default();
        let mut state = recording_state(5);

        state.enter(&mut calls);
        state.tick(&mut calls);
        state.tick(&mut calls);
        state.leave(&mut calls);

        assert_eq!(calls.log, vec!["entry", "tick", "tick", "exit"]);
    }

    #[test]
    fn enter_resets_timer() {
        let mut calls = Calls::default();
        let mut state = recording_state(2);

        state.enter(&mut calls);
        state.tick(&mut calls);
        state.tick(&mut calls);
        assert!(state.is_terminated());

        state.enter(&mut calls);
        assert!(!state.is_terminated());
        assert_eq!(state.ticks_remaining(), Some(2));
        assert_eq!(state.ticks_consumed(), 0);
    }

    #[test]
    fn state_without_duration_never_terminates() {
        let mut calls = Calls::default();
        let mut state: State<Phase, Calls> = State::new(Phase::Ready);

        state.enter(&mut calls);
        for _ in 0..500 {
            state.tick(&mut calls);
        }

        assert!(!state.is_terminated());
        assert_eq!(state.duration(), None);
        assert_eq!(state.ticks_consumed(), 500);
    }

    #[test]
    fn computed_duration_is_resolved_on_entry() {
        let mut calls = Calls {
            level: 3,
            ..Calls::default()
        };
        let mut state: State<Phase, Calls> = State::new(Phase::Ready)
            .with_timeout(Timeout::Computed(Box::new(|c: &Calls| c.level * 2)));

        state.enter(&mut calls);
        assert_eq!(state.duration(), Some(6));

        calls.level = 1;
        state.enter(&mut calls);
        assert_eq!(state.duration(), Some(2));
    }

    #[test]
    fn restart_timer_skips_hooks() {
        let mut calls = Calls::default();
        let mut state = recording_state(3);

        state.enter(&mut calls);
        state.tick(&mut calls);
        state.restart_timer();

        assert_eq!(state.ticks_remaining(), Some(3));
        assert_eq!(calls.log, vec!["entry", "tick"]);
    }
}
