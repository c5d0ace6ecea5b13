//! Guard predicates for gating transitions.
//!
//! Guards are side-effect free boolean functions over the machine context.
//! They are evaluated while the machine scans for an eligible transition and
//! may run several times per tick, so they must not mutate anything.

use std::fmt;

/// Side-effect free predicate that must hold for a transition to fire.
///
/// A guard reads the caller-supplied context `C`, such as a score or a flag
/// set by an update hook.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::Guard;
///
/// struct Board {
///     move_ready: bool,
/// }
///
/// let can_animate = Guard::new(|board: &Board| board.move_ready);
///
/// assert!(!can_animate.check(&Board { move_ready: false }));
/// assert!(can_animate.check(&Board { move_ready: true }));
/// ```
pub struct Guard<C> {
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a predicate.
    ///
    /// The predicate must be deterministic for a given context and free of
    /// side effects.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against the current context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
