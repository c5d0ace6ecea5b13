//! Identifier traits for states and events.
//!
//! The engine never inspects ids or events beyond comparing and hashing them,
//! so both traits are blanket-implemented for every type with the right derives.

use std::fmt::Debug;
use std::hash::Hash;

/// Identifier of a state inside a state machine.
///
/// Any `Clone + Eq + Hash + Debug` type qualifies. Enums are the usual choice,
/// but strings and integers work just as well.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::StateId;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Phase {
///     Intro,
///     Playing,
///     GameOver,
/// }
///
/// assert_eq!(Phase::Intro.name(), "Intro");
/// assert_eq!("menu".name(), "\"menu\"");
/// ```
pub trait StateId: Clone + Eq + Hash + Debug + Send + 'static {
    /// Human-readable name used in traces and error messages.
    ///
    /// Default implementation uses the `Debug` representation.
    fn name(&self) -> String {
        format!("{self:?}")
    }
}

impl<T> StateId for T where T: Clone + Eq + Hash + Debug + Send + 'static {}

/// External stimulus that can trigger a transition.
///
/// Events are compared by equality for `on(event)` transitions and handed to
/// predicates for `on_match(..)` transitions. Machines that take no input use `()`.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::Event;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Input {
///     Key(char),
///     Quit,
/// }
///
/// assert_eq!(Input::Key('a').describe(), "Key('a')");
/// ```
pub trait Event: Clone + PartialEq + Debug + Send + 'static {
    /// Human-readable description used in traces and error messages.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

impl<T> Event for T where T: Clone + PartialEq + Debug + Send + 'static {}
