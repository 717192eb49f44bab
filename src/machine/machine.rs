//! Machine definition and the pure transition function.

use crate::action::{Action, Event};
use crate::core::{Guard, State};
use crate::machine::error::TransitionError;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A transition taken when `event` arrives in state `from`.
///
/// Actions run in order; each receives the context produced by the one
/// before it.
#[derive(Clone)]
pub struct Transition<S: State> {
    pub from: S,
    pub event: String,
    pub to: S,
    pub guard: Option<Guard>,
    pub actions: Vec<Action>,
}

impl<S: State> Transition<S> {
    /// Check if this transition handles `event` in the given state (pure).
    pub fn can_execute(&self, current: &S, context: &Value, event: &Event) -> bool {
        if *current != self.from || self.event != event.kind {
            return false;
        }

        self.guard.as_ref().is_none_or(|g| g.check(context, event))
    }
}

/// State value plus context: everything a machine needs between events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineState<S: State> {
    pub value: S,
    pub context: Value,
    /// False when the last transition kept the state value and returned the
    /// very same context allocation.
    pub changed: bool,
}

impl<S: State> MachineState<S> {
    pub fn matches(&self, state: &S) -> bool {
        self.value == *state
    }
}

/// Machine definition: states, initial context and transitions.
///
/// A machine holds no current state. [`Machine::transition`] is a pure
/// function from a state and an event to the next state; use
/// [`interpret`](crate::machine::interpret) for a running instance.
pub struct Machine<S: State> {
    id: String,
    initial: S,
    context: Value,
    transitions: Vec<Transition<S>>,
}

impl<S: State> Machine<S> {
    pub fn new(id: impl Into<String>, initial: S, context: Value) -> Self {
        Self {
            id: id.into(),
            initial,
            context,
            transitions: Vec::new(),
        }
    }

    pub fn add_transition(&mut self, transition: Transition<S>) {
        self.transitions.push(transition);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transitions(&self) -> &[Transition<S>] {
        &self.transitions
    }

    pub fn initial_state(&self) -> MachineState<S> {
        MachineState {
            value: self.initial.clone(),
            context: self.context.clone(),
            changed: false,
        }
    }

    /// Compute the state that follows `state` when `event` arrives.
    ///
    /// `state` is only read, so transitioning the same state twice yields
    /// the same result both times.
    pub fn transition(
        &self,
        state: &MachineState<S>,
        event: &Event,
    ) -> Result<MachineState<S>, TransitionError> {
        if state.value.is_final() {
            return Err(TransitionError::FinalState {
                state: state.value.name().to_string(),
            });
        }

        let transition = self
            .transitions
            .iter()
            .find(|t| t.can_execute(&state.value, &state.context, event))
            .ok_or_else(|| TransitionError::NoTransition {
                from: state.value.name().to_string(),
                event: event.kind.clone(),
            })?;

        let context = transition
            .actions
            .iter()
            .try_fold(state.context.clone(), |context, action| {
                action(&context, event)
            })
            .map_err(|source| TransitionError::ActionFailed {
                from: state.value.name().to_string(),
                event: event.kind.clone(),
                source,
            })?;

        let changed = transition.to != state.value || !Value::ptr_eq(&context, &state.context);
        debug!(
            machine = %self.id,
            from = state.value.name(),
            to = transition.to.name(),
            event = %event.kind,
            changed,
            "transition"
        );

        Ok(MachineState {
            value: transition.to.clone(),
            context,
            changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{assign, ActionError};
    use crate::draft::RecipeError;
    use serde_json::json;

    crate::state_enum! {
        enum Door {
            Closed,
            Open,
            Broken,
        }
        final: [Broken]
    }

    fn door() -> Machine<Door> {
        let mut machine = Machine::new("door", Door::Closed, Value::from(json!({"opened": 0})));
        machine.add_transition(Transition {
            from: Door::Closed,
            event: "OPEN".into(),
            to: Door::Open,
            guard: None,
            actions: vec![assign(|draft, _| {
                let opened = draft.get("opened").and_then(Value::as_i64).unwrap_or(0);
                draft.set("opened", opened + 1)?;
                Ok(())
            })],
        });
        machine.add_transition(Transition {
            from: Door::Open,
            event: "CLOSE".into(),
            to: Door::Closed,
            guard: None,
            actions: vec![],
        });
        machine.add_transition(Transition {
            from: Door::Closed,
            event: "KICK".into(),
            to: Door::Broken,
            guard: Some(Guard::new(|ctx: &Value, _: &Event| {
                ctx.get("opened").and_then(Value::as_i64).unwrap_or(0) > 1
            })),
            actions: vec![],
        });
        machine
    }

    #[test]
    fn can_execute_matches_state_and_event() {
        let machine = door();
        let open = &machine.transitions()[0];
        let context = Value::object();

        assert!(open.can_execute(&Door::Closed, &context, &Event::new("OPEN")));
        assert!(!open.can_execute(&Door::Open, &context, &Event::new("OPEN")));
        assert!(!open.can_execute(&Door::Closed, &context, &Event::new("CLOSE")));
    }

    #[test]
    fn transition_runs_actions_and_moves_state() {
        let machine = door();
        let initial = machine.initial_state();

        let next = machine.transition(&initial, &Event::new("OPEN")).unwrap();
        assert_eq!(next.value, Door::Open);
        assert_eq!(next.context, Value::from(json!({"opened": 1})));
        assert!(next.changed);
        assert_eq!(initial.context, Value::from(json!({"opened": 0})));
    }

    #[test]
    fn transition_without_context_change_keeps_context_identity() {
        let machine = door();
        let open = machine
            .transition(&machine.initial_state(), &Event::new("OPEN"))
            .unwrap();
        let closed = machine.transition(&open, &Event::new("CLOSE")).unwrap();

        assert!(Value::ptr_eq(&closed.context, &open.context));
        assert!(closed.changed);
        assert!(closed.matches(&Door::Closed));
    }

    #[test]
    fn guard_blocks_transition() {
        let machine = door();
        let result = machine.transition(&machine.initial_state(), &Event::new("KICK"));
        assert_eq!(
            result,
            Err(TransitionError::NoTransition {
                from: "Closed".into(),
                event: "KICK".into(),
            })
        );
    }

    #[test]
    fn final_state_rejects_events() {
        let machine = door();
        let broken = MachineState {
            value: Door::Broken,
            context: Value::object(),
            changed: true,
        };
        assert!(matches!(
            machine.transition(&broken, &Event::new("OPEN")),
            Err(TransitionError::FinalState { .. })
        ));
    }

    #[test]
    fn failing_action_fails_the_transition() {
        let mut machine = Machine::new("m", Door::Closed, Value::object());
        machine.add_transition(Transition {
            from: Door::Closed,
            event: "OPEN".into(),
            to: Door::Open,
            guard: None,
            actions: vec![assign(|_, _| Err(RecipeError::failed("jammed")))],
        });

        let err = machine
            .transition(&machine.initial_state(), &Event::new("OPEN"))
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::ActionFailed {
                from: "Closed".into(),
                event: "OPEN".into(),
                source: ActionError::Recipe(RecipeError::Failed("jammed".into())),
            }
        );
    }
}
