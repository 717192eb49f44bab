//! Context-updating actions.
//!
//! An [`Action`] is the shape a state machine expects for a context update:
//! a pure function of `(context, event)` returning the next context. Two
//! factories build one:
//!
//! - [`assign`] runs a draft recipe that can read the event directly.
//! - [`assign_from_patch`] ignores any recipe and replays the patch list the
//!   event carries, as built by [`make_patch_event`].
//!
//! # Example
//!
//! ```rust
//! use draftwise::{assign_from_patch, make_patch_event, Event, Value};
//! use serde_json::json;
//!
//! let snapshot = Value::from(json!({"name": "", "age": null}));
//! let set_name = make_patch_event("UPDATE", &snapshot, |d| Ok(d.set("name", "David")?)).unwrap();
//! let set_age = make_patch_event("UPDATE", &snapshot, |d| Ok(d.set("age", 42)?)).unwrap();
//!
//! let update = assign_from_patch();
//! let context = update(&snapshot, &Event::from(set_name)).unwrap();
//! let context = update(&context, &Event::from(set_age)).unwrap();
//!
//! assert_eq!(context, Value::from(json!({"name": "David", "age": 42})));
//! ```

mod event;

pub use event::{make_patch_event, Event, PatchEvent};

use crate::draft::{produce, Draft, RecipeError};
use crate::patch::{replay_patches, ConflictPolicy, PatchConflict};
use crate::value::Value;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while an action computes the next context.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("event '{event}' carries no patches")]
    MissingPatches { event: String },

    #[error(transparent)]
    Recipe(#[from] RecipeError),

    #[error(transparent)]
    Conflict(#[from] PatchConflict),
}

/// Context-updating action: `(context, event) -> next context`.
pub type Action = Arc<dyn Fn(&Value, &Event) -> Result<Value, ActionError> + Send + Sync>;

/// Wrap a plain function as an [`Action`].
pub fn from_fn<F>(f: F) -> Action
where
    F: Fn(&Value, &Event) -> Result<Value, ActionError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Build an action from a recipe that edits a draft of the context.
///
/// The recipe receives the event, so it can read any payload imperatively;
/// the patch lists are not computed.
pub fn assign<F>(recipe: F) -> Action
where
    F: Fn(&mut Draft, &Event) -> Result<(), RecipeError> + Send + Sync + 'static,
{
    from_fn(move |context, event| Ok(produce(context, |draft| recipe(draft, event))?))
}

/// Build an action that replays the patches carried by the event, skipping
/// patches that no longer apply to the live context.
pub fn assign_from_patch() -> Action {
    assign_from_patch_with(ConflictPolicy::default())
}

/// Like [`assign_from_patch`] with an explicit conflict policy.
pub fn assign_from_patch_with(policy: ConflictPolicy) -> Action {
    from_fn(move |context, event| {
        let patches = event
            .patches
            .as_deref()
            .ok_or_else(|| ActionError::MissingPatches {
                event: event.kind.clone(),
            })?;
        let replay = replay_patches(context, patches, policy)?;
        Ok(replay.value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Patch;
    use crate::value::{Path, PathError};
    use serde_json::json;

    fn value(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn assign_reads_event_payload() {
        let action = assign(|draft, event| {
            draft.set("name", event.data.clone())?;
            Ok(())
        });
        let context = value(json!({"name": ""}));
        let next = action(&context, &Event::new("RENAME").with_data("Ada")).unwrap();

        assert_eq!(next, value(json!({"name": "Ada"})));
        assert_eq!(context, value(json!({"name": ""})));
    }

    #[test]
    fn assign_returns_same_context_when_nothing_changes() {
        let action = assign(|_, _| Ok(()));
        let context = value(json!({"a": [1]}));
        let next = action(&context, &Event::new("NOOP")).unwrap();
        assert!(Value::ptr_eq(&next, &context));
    }

    #[test]
    fn assign_surfaces_recipe_errors() {
        let action = assign(|draft, _| {
            draft.remove("missing")?;
            Ok(())
        });
        let err = action(&value(json!({})), &Event::new("X")).unwrap_err();
        assert!(matches!(
            err,
            ActionError::Recipe(RecipeError::Path(PathError::Unresolved { .. }))
        ));
    }

    #[test]
    fn patch_action_requires_patches() {
        let action = assign_from_patch();
        let err = action(&value(json!({})), &Event::new("UPDATE")).unwrap_err();
        assert_eq!(
            err,
            ActionError::MissingPatches {
                event: "UPDATE".into()
            }
        );
    }

    #[test]
    fn patch_action_skips_conflicts_by_default() {
        let event = Event {
            patches: Some(vec![
                Patch::Replace {
                    path: Path::from("profile.name"),
                    value: Value::from("x"),
                },
                Patch::Replace {
                    path: Path::from("age"),
                    value: Value::from(3),
                },
            ]),
            ..Event::new("UPDATE")
        };
        let next = assign_from_patch()(&value(json!({"age": 1})), &event).unwrap();
        assert_eq!(next, value(json!({"age": 3})));
    }

    #[test]
    fn patch_action_can_abort_on_conflict() {
        let event = Event {
            patches: Some(vec![Patch::Remove {
                path: Path::from("gone"),
            }]),
            ..Event::new("UPDATE")
        };
        let err = assign_from_patch_with(ConflictPolicy::Abort)(&value(json!({})), &event)
            .unwrap_err();
        assert!(matches!(err, ActionError::Conflict(PatchConflict { index: 0, .. })));
    }

    #[test]
    fn stale_patch_event_applies_to_live_context() {
        let snapshot = value(json!({"a": 0, "b": 0}));
        let event = make_patch_event("SET_B", &snapshot, |draft| {
            draft.set("b", 7)?;
            Ok(())
        })
        .unwrap();

        // The live context moved on after the snapshot was taken.
        let live = value(json!({"a": 5, "b": 0}));
        let next = assign_from_patch()(&live, &event.into()).unwrap();
        assert_eq!(next, value(json!({"a": 5, "b": 7})));
    }
}
