//! Patches: edits as plain data.
//!
//! A [`Patch`] is a serializable record of one structural edit. Patch lists
//! are produced by [`produce_with_patches`](crate::produce_with_patches) and
//! replayed here against whatever value is current, addressing every path
//! directly against that live value.

mod apply;
mod error;
mod validate;

pub use apply::{apply_patches, replay_patches, ConflictPolicy, Replay};
pub use error::PatchConflict;
pub use validate::validate_patches;

use crate::value::{Path, Value};
use serde::{Deserialize, Serialize};

/// A single structural edit.
///
/// On the wire a patch is `{"op": "replace", "path": ["a", 0], "value": 1}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Patch {
    /// Insert an object key or an array element.
    Add { path: Path, value: Value },
    /// Delete an object key or an array element.
    Remove { path: Path },
    /// Overwrite an object key or an existing array element.
    Replace { path: Path, value: Value },
}

impl Patch {
    pub fn path(&self) -> &Path {
        match self {
            Patch::Add { path, .. } | Patch::Remove { path } | Patch::Replace { path, .. } => path,
        }
    }

    /// The operation name as it appears on the wire.
    pub fn op(&self) -> &'static str {
        match self {
            Patch::Add { .. } => "add",
            Patch::Remove { .. } => "remove",
            Patch::Replace { .. } => "replace",
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Patch::Add { value, .. } | Patch::Replace { value, .. } => Some(value),
            Patch::Remove { .. } => None,
        }
    }
}
