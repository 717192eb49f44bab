//! Errors for building and running machines.

use crate::action::ActionError;
use thiserror::Error;

/// Errors that can occur when building machines and transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition event not specified. Call .on(event_type)")]
    MissingEvent,
}

/// Errors that can occur while taking a transition.
///
/// A failed transition leaves the machine state as it was.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransitionError {
    #[error("No transition for event '{event}' from state '{from}'")]
    NoTransition { from: String, event: String },

    #[error("State '{state}' is final and accepts no events")]
    FinalState { state: String },

    #[error("Action for event '{event}' in state '{from}' failed: {source}")]
    ActionFailed {
        from: String,
        event: String,
        source: ActionError,
    },
}
