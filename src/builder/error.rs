//! Build errors for state machine declarations.

use thiserror::Error;

/// A single problem found while validating a machine declaration.
///
/// States are identified by their `name()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("Initial state not specified. Call .initial_state(id) before .build()")]
    MissingInitialState,

    #[error("Initial state specified twice ({first} and {second})")]
    InitialStateRedefined { first: String, second: String },

    #[error("Initial state {state} is not declared")]
    UndeclaredInitialState { state: String },

    #[error("State {state} is declared more than once")]
    DuplicateState { state: String },

    #[error("Transition {from} -> {to} starts at an undeclared state")]
    UnknownSource { from: String, to: String },

    #[error("Transition {from} -> {to} leads to an undeclared state")]
    UnknownTarget { from: String, to: String },
}

/// Error returned by `build()` when the declaration is invalid.
///
/// Carries every problem found, not just the first one.
#[derive(Debug, Clone, Error)]
#[error("Invalid state machine '{}': {}", .machine, describe(.issues))]
pub struct BuildError {
    pub machine: String,
    pub issues: Vec<ConfigIssue>,
}

fn describe(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl BuildError {
    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    pub fn contains(&self, issue: &ConfigIssue) -> bool {
        self.issues.contains(issue)
    }
}
