//! Tickfsm: a tick-driven finite state machine engine
//!
//! Machines are declared once with a fluent builder and then advanced one
//! tick at a time by the host loop. Each `update` runs the current state's
//! tick hook, dequeues at most one pending event and fires at most one
//! transition.
//!
//! # Core Concepts
//!
//! - **States**: identified by any hashable value, with optional entry, tick
//!   and exit hooks and an optional timeout counted in ticks
//! - **Transitions**: fire always, on a matching event, or on timeout, and
//!   may be guarded by a predicate over the caller's context
//! - **Context**: the caller owns all mutable data and lends it to the
//!   machine on every call, so hooks never need shared ownership
//! - **Tracing**: activity is reported through a [`Tracer`], which logs
//!   through `tracing` by default
//!
//! # Example
//!
//! ```rust
//! use tickfsm::{StateMachine, StepResult};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
//! enum Light {
//!     Red,
//!     Green,
//!     Yellow,
//! }
//!
//! #[derive(Default)]
//! struct Lamp {
//!     changes: u32,
//! }
//!
//! let mut machine = StateMachine::<Light, (), Lamp>::builder()
//!     .description("traffic light")
//!     .initial_state(Light::Red)
//!     .states()
//!     .state(Light::Red)
//!     .timeout_after(3)
//!     .state(Light::Green)
//!     .timeout_after(3)
//!     .state(Light::Yellow)
//!     .timeout_after(1)
//!     .on_exit(|lamp: &mut Lamp| lamp.changes += 1)
//!     .transitions()
//!     .change(Light::Red, Light::Green)
//!     .on_timeout()
//!     .change(Light::Green, Light::Yellow)
//!     .on_timeout()
//!     .change(Light::Yellow, Light::Red)
//!     .on_timeout()
//!     .build()
//!     .unwrap();
//!
//! let mut lamp = Lamp::default();
//! machine.init(&mut lamp).unwrap();
//!
//! assert_eq!(machine.update(&mut lamp).unwrap(), StepResult::Stayed);
//! machine.update(&mut lamp).unwrap();
//! let step = machine.update(&mut lamp).unwrap();
//! assert_eq!(step, StepResult::Transitioned { from: Light::Red, to: Light::Green });
//!
//! for _ in 0..4 {
//!     machine.update(&mut lamp).unwrap();
//! }
//! assert!(machine.is_in(&Light::Red));
//! assert_eq!(lamp.changes, 1);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod runtime;
pub mod trace;

// Re-export commonly used types
pub use builder::{BuildError, ConfigIssue, StateMachineBuilder};
pub use config::{MachineConfig, TickRate, UnhandledEventPolicy};
pub use core::{Event, Guard, StateId, Timeout, FOREVER};
pub use runtime::{MachineError, StateMachine, StepResult, TransitionContext};
pub use trace::{LogTracer, NoopTracer, Tracer};
