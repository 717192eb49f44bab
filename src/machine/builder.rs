//! Fluent builders for machines and transitions.

use crate::action::{assign, assign_from_patch_with, Action, Event};
use crate::core::{Guard, State};
use crate::draft::{Draft, RecipeError};
use crate::machine::error::BuildError;
use crate::machine::machine::{Machine, Transition};
use crate::patch::ConflictPolicy;
use crate::value::Value;

/// Builder for constructing transitions with a fluent API.
///
/// Without a `.to(state)` the transition stays in its source state, which
/// is the usual shape for context-only updates.
pub struct TransitionBuilder<S: State> {
    from: Option<S>,
    event: Option<String>,
    to: Option<S>,
    guard: Option<Guard>,
    actions: Vec<Action>,
}

impl<S: State> TransitionBuilder<S> {
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            to: None,
            guard: None,
            actions: Vec::new(),
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the event type that triggers the transition (required).
    pub fn on(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Set the target state (optional).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value, &Event) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Append an action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Append a draft-recipe action.
    pub fn assign<F>(self, recipe: F) -> Self
    where
        F: Fn(&mut Draft, &Event) -> Result<(), RecipeError> + Send + Sync + 'static,
    {
        self.action(assign(recipe))
    }

    /// Append an action replaying the event's patches.
    pub fn assign_from_patch(self) -> Self {
        self.assign_from_patch_with(ConflictPolicy::default())
    }

    pub fn assign_from_patch_with(self, policy: ConflictPolicy) -> Self {
        self.action(assign_from_patch_with(policy))
    }

    pub fn build(self) -> Result<Transition<S>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let to = self.to.unwrap_or_else(|| from.clone());

        Ok(Transition {
            from,
            event,
            to,
            guard: self.guard,
            actions: self.actions,
        })
    }
}

impl<S: State> Default for TransitionBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing machines with a fluent API.
pub struct MachineBuilder<S: State> {
    id: String,
    initial: Option<S>,
    context: Value,
    transitions: Vec<Transition<S>>,
}

impl<S: State> MachineBuilder<S> {
    /// A builder for machine `"machine"` with an empty object as context.
    pub fn new() -> Self {
        Self {
            id: "machine".to_string(),
            initial: None,
            context: Value::object(),
            transitions: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the initial context.
    pub fn context(mut self, context: impl Into<Value>) -> Self {
        self.context = context.into();
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    pub fn build(self) -> Result<Machine<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut machine = Machine::new(self.id, initial, self.context);
        for transition in self.transitions {
            machine.add_transition(transition);
        }

        Ok(machine)
    }
}

impl<S: State> Default for MachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
