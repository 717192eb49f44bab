//! Replaying patch lists against a live value.

use super::{Patch, PatchConflict};
use crate::draft::finalize;
use crate::value::edit::{self, WriteMode};
use crate::value::{PathError, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do when a patch does not apply to the live value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Log and record the conflicting patch, then keep going.
    #[default]
    Skip,
    /// Fail the whole replay; the base value is returned to nobody.
    Abort,
}

/// Outcome of [`replay_patches`].
#[derive(Clone, Debug, PartialEq)]
pub struct Replay {
    pub value: Value,
    /// Number of patches that applied.
    pub applied: usize,
    /// Conflicts skipped under [`ConflictPolicy::Skip`], in list order.
    pub skipped: Vec<PatchConflict>,
}

pub(crate) fn apply_one(root: &mut Value, patch: &Patch) -> Result<(), PathError> {
    match patch {
        Patch::Add { path, value } => edit::write(root, path, value.clone(), WriteMode::Insert),
        Patch::Replace { path, value } => {
            edit::write(root, path, value.clone(), WriteMode::Replace)
        }
        Patch::Remove { path } => edit::remove(root, path).map(|_| ()),
    }
}

/// Apply `patches` in order against `base`, one at a time.
///
/// Every patch addresses the value produced by the patches before it, so
/// two patch lists computed from the same snapshot but touching different
/// paths compose in either order, and writes to the same path resolve to
/// whichever list was replayed last. `base` is never modified, and paths the
/// patches do not touch keep their identity in the result.
///
/// # Example
///
/// ```rust
/// use draftwise::{replay_patches, ConflictPolicy, Patch, Path, Value};
/// use serde_json::json;
///
/// let live = Value::from(json!({"name": "", "age": null}));
/// let patches = vec![
///     Patch::Replace { path: Path::from("age"), value: Value::from(42) },
///     Patch::Remove { path: Path::from("nickname") },
/// ];
///
/// let replay = replay_patches(&live, &patches, ConflictPolicy::Skip).unwrap();
/// assert_eq!(replay.value, Value::from(json!({"name": "", "age": 42})));
/// assert_eq!(replay.applied, 1);
/// assert_eq!(replay.skipped.len(), 1);
/// ```
pub fn replay_patches(
    base: &Value,
    patches: &[Patch],
    policy: ConflictPolicy,
) -> Result<Replay, PatchConflict> {
    let mut working = base.clone();
    let mut skipped = Vec::new();

    for (index, patch) in patches.iter().enumerate() {
        let Err(source) = apply_one(&mut working, patch) else {
            continue;
        };
        let conflict = PatchConflict::new(index, patch, source);
        match policy {
            ConflictPolicy::Abort => return Err(conflict),
            ConflictPolicy::Skip => {
                warn!(
                    index,
                    op = patch.op(),
                    path = %patch.path(),
                    error = %conflict.source,
                    "skipping patch that no longer applies"
                );
                skipped.push(conflict);
            }
        }
    }

    let applied = patches.len() - skipped.len();
    debug!(applied, skipped = skipped.len(), "replayed patches");
    Ok(Replay {
        value: finalize::share(base, working),
        applied,
        skipped,
    })
}

/// Strict replay: the first conflict aborts and nothing is returned.
pub fn apply_patches(base: &Value, patches: &[Patch]) -> Result<Value, PatchConflict> {
    replay_patches(base, patches, ConflictPolicy::Abort).map(|replay| replay.value)
}
