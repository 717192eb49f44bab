//! Draft-recipe application.
//!
//! A recipe describes an edit imperatively against a [`Draft`]; the result
//! is a new [`Value`] that shares every untouched subtree with the base.
//! The base itself is never written: the draft starts as an O(1) clone of
//! it and copy-on-write copies only the containers the recipe reaches into.
//!
//! # Example
//!
//! ```rust
//! use draftwise::{produce_with_patches, Patch, Path, Value};
//! use serde_json::json;
//!
//! let base = Value::from(json!({"count": 0, "log": {"entries": []}}));
//!
//! let produced = produce_with_patches(&base, |draft| {
//!     draft.set("count", 1)?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert_eq!(produced.next.get("count"), Some(&Value::from(1)));
//! assert!(Value::ptr_eq(produced.next.get("log").unwrap(), base.get("log").unwrap()));
//! assert_eq!(
//!     produced.patches,
//!     vec![Patch::Replace { path: Path::from("count"), value: Value::from(1) }]
//! );
//! ```

mod error;
pub(crate) mod finalize;

pub use error::RecipeError;

use crate::patch::Patch;
use crate::value::edit::{self, WriteMode};
use crate::value::{Path, PathError, Value};
use finalize::PatchPair;
use tracing::{trace, warn};

/// Short-lived mutable view over a value, handed to recipes.
///
/// Drafts cannot be created outside this crate and only live for the
/// duration of one recipe call.
pub struct Draft {
    root: Value,
    replacement: Option<Value>,
}

impl Draft {
    pub(crate) fn new(base: &Value) -> Self {
        Self {
            root: base.clone(),
            replacement: None,
        }
    }

    /// The draft's current value.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Direct copy-on-write access to the whole draft.
    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    pub fn get(&self, path: impl Into<Path>) -> Option<&Value> {
        self.root.pointer(&path.into())
    }

    /// Mutable access to the value at `path`.
    pub fn get_mut(&mut self, path: impl Into<Path>) -> Result<&mut Value, PathError> {
        let path = path.into();
        match self.root.pointer_mut(&path) {
            Some(value) => Ok(value),
            None => Err(PathError::Unresolved { path }),
        }
    }

    /// Assign `value` at `path`.
    ///
    /// Object keys are inserted or overwritten. Array slots must exist,
    /// except that the slot one past the end appends.
    pub fn set(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<(), PathError> {
        edit::write(&mut self.root, &path.into(), value.into(), WriteMode::Assign)
    }

    /// Remove the value at `path`, returning it.
    pub fn remove(&mut self, path: impl Into<Path>) -> Result<Value, PathError> {
        edit::remove(&mut self.root, &path.into())
    }

    /// Append to the array at `path`.
    pub fn push(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<(), PathError> {
        edit::push(&mut self.root, &path.into(), value.into())
    }

    /// Edit the value at `path` in place.
    pub fn update<F>(&mut self, path: impl Into<Path>, f: F) -> Result<(), PathError>
    where
        F: FnOnce(&mut Value),
    {
        f(self.get_mut(path)?);
        Ok(())
    }

    /// Replace the whole value instead of editing it.
    ///
    /// A replacement takes precedence over any edits made to the draft.
    pub fn replace(&mut self, value: impl Into<Value>) {
        self.replacement = Some(value.into());
    }

    /// Whether the draft's contents differ from `base`. Mutable access that
    /// wrote nothing does not count.
    fn has_edits(&self, base: &Value) -> bool {
        !Value::ptr_eq(&finalize::share(base, self.root.clone()), base)
    }

    fn finish(self, base: &Value) -> Value {
        match self.replacement {
            Some(ref replacement) => {
                if self.has_edits(base) {
                    warn!("recipe both edited the draft and replaced it; keeping the replacement");
                }
                finalize::share(base, replacement.clone())
            }
            None => finalize::share(base, self.root),
        }
    }
}

/// Result of [`produce_with_patches`].
#[derive(Clone, Debug, PartialEq)]
pub struct Produced {
    pub next: Value,
    /// Edits turning the base into `next`, in application order.
    pub patches: Vec<Patch>,
    /// Edits turning `next` back into the base.
    pub inverse_patches: Vec<Patch>,
}

/// Run `recipe` against a draft of `base` and return the resulting value.
///
/// When the recipe changes nothing, the result is `base` itself (the same
/// allocation). A failing recipe leaves `base` as it was.
pub fn produce<F>(base: &Value, recipe: F) -> Result<Value, RecipeError>
where
    F: FnOnce(&mut Draft) -> Result<(), RecipeError>,
{
    let mut draft = Draft::new(base);
    recipe(&mut draft)?;
    Ok(draft.finish(base))
}

/// Like [`produce`], also returning forward and inverse patches.
pub fn produce_with_patches<F>(base: &Value, recipe: F) -> Result<Produced, RecipeError>
where
    F: FnOnce(&mut Draft) -> Result<(), RecipeError>,
{
    let next = produce(base, recipe)?;
    let mut pair = PatchPair::default();
    finalize::diff(base, &next, &Path::root(), &mut pair);
    trace!(
        patches = pair.forward.len(),
        inverse = pair.inverse.len(),
        "produced patches"
    );
    Ok(Produced {
        next,
        patches: pair.forward,
        inverse_patches: pair.inverse,
    })
}
