//! Running machine instances.

use crate::action::Event;
use crate::core::{State, StateHistory, StateTransition};
use crate::machine::error::TransitionError;
use crate::machine::machine::{Machine, MachineState};
use crate::value::Value;
use chrono::Utc;
use tracing::warn;

/// A machine paired with its current state and history.
///
/// Events are handled one at a time through [`Interpreter::send`]; each
/// accepted event replaces the current state with the one the machine
/// computed. Every accepted event is appended to the history in
/// place; the history is never truncated.
pub struct Interpreter<S: State> {
    pub(crate) machine: Machine<S>,
    pub(crate) state: MachineState<S>,
    pub(crate) history: StateHistory<S>,
}

/// Start a machine in its initial state.
pub fn interpret<S: State>(machine: Machine<S>) -> Interpreter<S> {
    let state = machine.initial_state();
    Interpreter {
        machine,
        state,
        history: StateHistory::new(),
    }
}

impl<S: State> Interpreter<S> {
    /// Deliver an event.
    ///
    /// On error the current state and history are left untouched.
    pub fn send(&mut self, event: impl Into<Event>) -> Result<&MachineState<S>, TransitionError> {
        let event = event.into();
        let next = match self.machine.transition(&self.state, &event) {
            Ok(next) => next,
            Err(err) => {
                warn!(machine = %self.machine.id(), event = %event.kind, error = %err, "event rejected");
                return Err(err);
            }
        };

        self.history.push(StateTransition {
            from: self.state.value.clone(),
            to: next.value.clone(),
            event: event.kind,
            timestamp: Utc::now(),
        });
        self.state = next;
        Ok(&self.state)
    }

    pub fn state(&self) -> &MachineState<S> {
        &self.state
    }

    pub fn context(&self) -> &Value {
        &self.state.context
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn machine(&self) -> &Machine<S> {
        &self.machine
    }

    pub fn is_final(&self) -> bool {
        self.state.value.is_final()
    }
}
