//! Events delivered to actions, and the patch-event factory.

use crate::draft::{produce_with_patches, Draft, RecipeError};
use crate::patch::Patch;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Plain-data event: a type tag, an optional payload and, for patch
/// events, the precomputed patch lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patches: Option<Vec<Patch>>,

    #[serde(
        default,
        rename = "inversePatches",
        skip_serializing_if = "Option::is_none"
    )]
    pub inverse_patches: Option<Vec<Patch>>,
}

impl Event {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: Value::Null,
            patches: None,
            inverse_patches: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = data.into();
        self
    }
}

impl From<&str> for Event {
    fn from(kind: &str) -> Self {
        Event::new(kind)
    }
}

/// Event carrying the effect of a recipe as patches instead of the recipe.
///
/// Built once by [`make_patch_event`] and immutable afterwards; it holds no
/// reference to the snapshot it was computed from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatchEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub patches: Vec<Patch>,
    #[serde(rename = "inversePatches")]
    pub inverse_patches: Vec<Patch>,
}

impl From<PatchEvent> for Event {
    fn from(event: PatchEvent) -> Self {
        Event {
            kind: event.kind,
            data: Value::Null,
            patches: Some(event.patches),
            inverse_patches: Some(event.inverse_patches),
        }
    }
}

/// Run `recipe` against `base` and package its effect as a [`PatchEvent`].
///
/// `base` is whatever snapshot the caller holds, possibly stale relative to
/// the running machine; this function never reads machine state itself.
///
/// # Example
///
/// ```rust
/// use draftwise::{make_patch_event, Value};
/// use serde_json::json;
///
/// let snapshot = Value::from(json!({"name": "", "age": null}));
/// let event = make_patch_event("UPDATE", &snapshot, |draft| {
///     draft.set("name", "David")?;
///     Ok(())
/// })
/// .unwrap();
///
/// assert_eq!(event.kind, "UPDATE");
/// assert_eq!(event.patches.len(), 1);
/// assert_eq!(
///     serde_json::to_value(&event).unwrap(),
///     json!({
///         "type": "UPDATE",
///         "patches": [{"op": "replace", "path": ["name"], "value": "David"}],
///         "inversePatches": [{"op": "replace", "path": ["name"], "value": ""}]
///     })
/// );
/// ```
pub fn make_patch_event<F>(
    kind: impl Into<String>,
    base: &Value,
    recipe: F,
) -> Result<PatchEvent, RecipeError>
where
    F: FnOnce(&mut Draft) -> Result<(), RecipeError>,
{
    let kind = kind.into();
    let produced = produce_with_patches(base, recipe)?;
    trace!(event = %kind, patches = produced.patches.len(), "built patch event");
    Ok(PatchEvent {
        kind,
        patches: produced.patches,
        inverse_patches: produced.inverse_patches,
    })
}
