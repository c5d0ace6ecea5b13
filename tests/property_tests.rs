//! Property-based tests for the tick loop.
//!
//! These tests use proptest to check scheduling properties across many
//! randomly generated machines and input sequences.

use proptest::prelude::*;
use tickfsm::runtime::{State, Transition, TransitionContext, Trigger};
use tickfsm::{Guard, StateMachine, StepResult};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Mode {
    Idle,
    Busy,
    Cooldown,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Signal {
    Start,
    Stop,
    Ping(u8),
}

prop_compose! {
    fn arbitrary_signal()(variant in 0..3u8, payload in any::<u8>()) -> Signal {
        match variant {
            0 => Signal::Start,
            1 => Signal::Stop,
            _ => Signal::Ping(payload),
        }
    }
}

#[derive(Default, Debug, PartialEq)]
struct Counters {
    ticks: u32,
    pings: Vec<u8>,
    entries: u32,
}

fn worker() -> StateMachine<Mode, Signal, Counters> {
    StateMachine::<Mode, Signal, Counters>::builder()
        .initial_state(Mode::Idle)
        .states()
        .state(Mode::Idle)
        .on_entry(|c: &mut Counters| c.entries += 1)
        .state(Mode::Busy)
        .on_tick(|c: &mut Counters| c.ticks += 1)
        .timeout_with(|c: &Counters| 1 + c.pings.len() as u32 % 4)
        .state(Mode::Cooldown)
        .timeout_after(2)
        .transitions()
        .change(Mode::Idle, Mode::Busy)
        .on(Signal::Start)
        .keep(Mode::Idle)
        .on_match(|s: &Signal| matches!(s, Signal::Ping(_)))
        .act(|c: &mut Counters, firing: &TransitionContext<'_, Mode, Signal>| {
            if let Some(Signal::Ping(value)) = firing.event {
                c.pings.push(*value);
            }
        })
        .change(Mode::Busy, Mode::Idle)
        .on(Signal::Stop)
        .change(Mode::Busy, Mode::Cooldown)
        .on_timeout()
        .change(Mode::Cooldown, Mode::Idle)
        .on_timeout()
        .build()
        .unwrap()
}

fn two_step(duration: u32) -> StateMachine<Mode, Signal, ()> {
    StateMachine::<Mode, Signal, ()>::builder()
        .initial_state(Mode::Busy)
        .states()
        .state(Mode::Busy)
        .timeout_after(duration)
        .state(Mode::Idle)
        .transitions()
        .keep(Mode::Busy)
        .on(Signal::Start)
        .change(Mode::Busy, Mode::Idle)
        .on_timeout()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn same_inputs_produce_same_run(
        inputs in prop::collection::vec(prop::option::of(arbitrary_signal()), 0..60)
    ) {
        let mut first = worker();
        let mut second = worker();
        let mut first_counters = Counters::default();
        let mut second_counters = Counters::default();
        first.init(&mut first_counters).unwrap();
        second.init(&mut second_counters).unwrap();

        for input in &inputs {
            if let Some(signal) = input {
                first.add_input(*signal);
                second.add_input(*signal);
            }
            let a = first.update(&mut first_counters).unwrap();
            let b = second.update(&mut second_counters).unwrap();
            prop_assert_eq!(a, b);
        }

        prop_assert_eq!(first.current_state().unwrap(), second.current_state().unwrap());
        prop_assert_eq!(first_counters, second_counters);
    }

    #[test]
    fn each_update_consumes_at_most_one_input(
        signals in prop::collection::vec(arbitrary_signal(), 0..30)
    ) {
        let mut machine = worker();
        let mut counters = Counters::default();
        machine.init(&mut counters).unwrap();

        for signal in &signals {
            machine.add_input(*signal);
        }
        for remaining in (0..signals.len()).rev() {
            machine.update(&mut counters).unwrap();
            prop_assert_eq!(machine.pending_inputs(), remaining);
        }
    }

    #[test]
    fn timeout_fires_on_the_last_tick(duration in 1u32..64) {
        let mut machine = two_step(duration);
        machine.init(&mut ()).unwrap();

        for _ in 1..duration {
            prop_assert_eq!(machine.update(&mut ()).unwrap(), StepResult::Stayed);
        }
        prop_assert_eq!(
            machine.update(&mut ()).unwrap(),
            StepResult::Transitioned { from: Mode::Busy, to: Mode::Idle }
        );
    }

    #[test]
    fn reentry_restarts_the_countdown(duration in 1u32..32, elapsed in 0u32..32) {
        let elapsed = elapsed % duration;
        let mut machine = two_step(duration);
        machine.init(&mut ()).unwrap();

        for _ in 0..elapsed {
            machine.update(&mut ()).unwrap();
        }
        let step = machine.process(Signal::Start, &mut ()).unwrap();
        prop_assert_eq!(step, StepResult::Transitioned { from: Mode::Busy, to: Mode::Busy });
        prop_assert_eq!(machine.state(&Mode::Busy).unwrap().ticks_remaining(), Some(duration));

        for _ in 1..duration {
            machine.update(&mut ()).unwrap();
        }
        prop_assert!(machine.is_in(&Mode::Busy));
        machine.update(&mut ()).unwrap();
        prop_assert!(machine.is_in(&Mode::Idle));
    }

    #[test]
    fn first_eligible_transition_wins(guards in prop::collection::vec(any::<bool>(), 1..8)) {
        let mut builder = StateMachine::<u8, (), ()>::builder()
            .initial_state(0)
            .add_state(State::new(0));
        for (index, open) in guards.iter().copied().enumerate() {
            let target = index as u8 + 1;
            let mut transition = Transition::new(0, target, Trigger::Always);
            transition.guard = Some(Guard::new(move |_: &()| open));
            builder = builder.add_state(State::new(target)).add_transition(transition);
        }
        let mut machine = builder.build().unwrap();
        machine.init(&mut ()).unwrap();

        let step = machine.update(&mut ()).unwrap();
        match guards.iter().position(|open| *open) {
            Some(index) => prop_assert_eq!(
                step,
                StepResult::Transitioned { from: 0, to: index as u8 + 1 }
            ),
            None => prop_assert_eq!(step, StepResult::Stayed),
        }
    }

    #[test]
    fn chained_transitions_advance_one_step_per_tick(length in 1u8..20) {
        let mut builder = StateMachine::<u8, (), ()>::builder()
            .initial_state(0)
            .add_state(State::new(0));
        for id in 1..=length {
            builder = builder
                .add_state(State::new(id))
                .add_transition(Transition::new(id - 1, id, Trigger::Always));
        }
        let mut machine = builder.build().unwrap();
        machine.init(&mut ()).unwrap();

        for id in 1..=length {
            machine.update(&mut ()).unwrap();
            prop_assert_eq!(*machine.current_state().unwrap(), id);
        }
        prop_assert_eq!(machine.update(&mut ()).unwrap(), StepResult::Stayed);
    }

    #[test]
    fn events_are_handled_in_arrival_order(pings in prop::collection::vec(any::<u8>(), 0..40)) {
        let mut machine = worker();
        let mut counters = Counters::default();
        machine.init(&mut counters).unwrap();

        for ping in &pings {
            machine.add_input(Signal::Ping(*ping));
        }
        for _ in 0..pings.len() {
            machine.update(&mut counters).unwrap();
        }

        prop_assert_eq!(&counters.pings, &pings);
        prop_assert_eq!(counters.entries as usize, pings.len() + 1);
    }
}
