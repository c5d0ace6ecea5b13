//! Validation of machine declarations.
//!
//! Every rule is checked and every violation is reported. Checks are
//! accumulated with Stillwater's `Validation` rather than short-circuiting.

use crate::builder::error::ConfigIssue;
use crate::core::{Event, StateId};
use crate::runtime::{State, Transition};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigIssue>>;

fn require(ok: bool, issue: impl FnOnce() -> ConfigIssue) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(issue())
    }
}

/// Check the initial state was set exactly once and names a declared state.
fn check_initial<S: StateId>(initial: &[S], declared: &HashSet<&S>) -> Vec<Check> {
    let Some((first, rest)) = initial.split_first() else {
        return vec![Validation::fail(ConfigIssue::MissingInitialState)];
    };

    let mut checks = vec![require(declared.contains(first), || {
        ConfigIssue::UndeclaredInitialState {
            state: first.name(),
        }
    })];
    checks.extend(rest.iter().map(|second| {
        Validation::fail(ConfigIssue::InitialStateRedefined {
            first: first.name(),
            second: second.name(),
        })
    }));
    checks
}

fn check_unique<S: StateId, C>(states: &[State<S, C>]) -> Vec<Check> {
    let mut seen = HashSet::new();
    states
        .iter()
        .map(|state| {
            require(seen.insert(state.id()), || ConfigIssue::DuplicateState {
                state: state.id().name(),
            })
        })
        .collect()
}

fn check_endpoints<S: StateId, E: Event, C>(
    transitions: &[Transition<S, E, C>],
    declared: &HashSet<&S>,
) -> Vec<Check> {
    transitions
        .iter()
        .flat_map(|t| {
            [
                require(declared.contains(&t.source), || ConfigIssue::UnknownSource {
                    from: t.source.name(),
                    to: t.target.name(),
                }),
                require(declared.contains(&t.target), || ConfigIssue::UnknownTarget {
                    from: t.source.name(),
                    to: t.target.name(),
                }),
            ]
        })
        .collect()
}

/// Run all declaration checks, returning every issue found.
pub(crate) fn validate<S: StateId, E: Event, C>(
    initial: &[S],
    states: &[State<S, C>],
    transitions: &[Transition<S, E, C>],
) -> Result<(), Vec<ConfigIssue>> {
    let declared: HashSet<&S> = states.iter().map(State::id).collect();

    let mut checks = check_initial(initial, &declared);
    checks.extend(check_unique(states));
    checks.extend(check_endpoints(transitions, &declared));

    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(issues) => Err(issues.iter().cloned().collect()),
    }
}
